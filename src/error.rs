use crate::airport::AirportId;
use crate::crew::CrewId;
use crate::flight::{FlightId, PassengerId};
use crate::time::Time;

#[derive(Debug, thiserror::Error)]
pub enum AirlineError {
    #[error("flight {0} not found")]
    FlightNotFound(FlightId),

    #[error("crew member {0} not found")]
    CrewNotFound(CrewId),

    #[error("no seat available on flight {0}")]
    NoSeatAvailable(FlightId),

    #[error("passenger {passenger} has no active booking on flight {flight}")]
    NoActiveBooking {
        passenger: PassengerId,
        flight: FlightId,
    },

    #[error("no route found from {from} to {to}")]
    NoRouteFound { from: AirportId, to: AirportId },

    #[error("earliest departure {earliest} is later than latest departure {latest}")]
    InvalidTimeWindow { earliest: Time, latest: Time },

    #[error("flight {flight} has invalid departure time {departure}")]
    InvalidDepartureTime { flight: FlightId, departure: u64 },

    #[error("invalid flight: {0}")]
    InvalidFlight(String),

    #[error("flight {flight} cannot shrink to {seats} seats: seat {occupied} is booked")]
    SeatsInUse {
        flight: FlightId,
        seats: u32,
        occupied: u32,
    },

    #[error(
        "could not staff flight {flight}: {pilots_short} pilot(s) and {attendants_short} attendant(s) short"
    )]
    CrewAssignmentIncomplete {
        flight: FlightId,
        pilots_short: usize,
        attendants_short: usize,
    },

    #[error("unknown crew role '{0}' (expected Pilot or Attendant)")]
    UnknownRole(String),

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario: {0}")]
    Scenario(#[from] serde_json::Error),
}
