use crate::airport::{AirportId, airport_id};
use crate::config::{NewFlight, Scenario, Settings};
use crate::crew::{CrewId, CrewRegistry, Role};
use crate::error::AirlineError;
use crate::flight::{Booking, BookingOutcome, Cancellation, Flight, FlightId, PassengerId};
use crate::ledger::FlightLedger;
use crate::network::{Route, RouteGraph};
use crate::rostering::{self, Duty, RosterReport, Vacancy};
use crate::time::Time;
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// Fields of a flight that may change after it is created.
#[derive(Debug, Clone, Default)]
pub struct FlightUpdate {
    pub departure: Option<u64>,
    pub arrival: Option<u64>,
    pub seats: Option<u32>,
    pub base_price: Option<f64>,
}

#[derive(Debug)]
pub struct DepartureSearch<'a> {
    pub flights: Vec<&'a Flight>,
    /// Records whose departure lies outside the day.
    pub skipped: Vec<AirlineError>,
}

/// The whole airline: flights, crew and the route network derived from the
/// flights. Every mutation of the ledger keeps the graph in step.
pub struct Airline {
    ledger: FlightLedger,
    crew: CrewRegistry,
    routes: RouteGraph,
}

impl Airline {
    pub fn new(settings: Settings) -> Airline {
        Airline {
            ledger: FlightLedger::new(settings.first_flight_id),
            crew: CrewRegistry::new(settings.first_crew_id),
            routes: RouteGraph::new(),
        }
    }

    pub fn from_scenario(scenario: Scenario) -> Result<Airline, AirlineError> {
        let mut airline = Airline::new(scenario.settings);
        for flight in scenario.flights {
            airline.add_flight(flight)?;
        }
        for member in scenario.crew {
            airline.add_crew(&member.name, member.role);
        }
        Ok(airline)
    }

    pub fn load_from_file(path: &str) -> Result<Airline, AirlineError> {
        let data = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&data)?;
        Airline::from_scenario(scenario)
    }

    fn validate(
        origin: &AirportId,
        destination: &AirportId,
        departure: u64,
        arrival: u64,
        seats: u32,
        base_price: f64,
    ) -> Result<(), AirlineError> {
        let invalid = |msg: String| Err(AirlineError::InvalidFlight(msg));
        if origin.is_empty() || destination.is_empty() {
            return invalid("origin and destination are required".into());
        }
        if origin == destination {
            return invalid(format!("origin and destination are both {origin}"));
        }
        if !Time(departure).is_within_day() || !Time(arrival).is_within_day() {
            return invalid(format!("times {departure}-{arrival} fall outside the day"));
        }
        if arrival <= departure {
            return invalid(format!("arrival {arrival} is not after departure {departure}"));
        }
        if seats == 0 {
            return invalid("a flight needs at least one seat".into());
        }
        if !base_price.is_finite() || base_price < 0.0 {
            return invalid(format!("base price {base_price} is not a valid fare"));
        }
        Ok(())
    }

    pub fn add_flight(&mut self, new: NewFlight) -> Result<FlightId, AirlineError> {
        let origin = airport_id(&new.origin);
        let destination = airport_id(&new.destination);
        Self::validate(&origin, &destination, new.departure, new.arrival, new.seats, new.base_price)?;

        let id = self.ledger.next_id();
        let flight = Flight::new(
            id,
            origin,
            destination,
            Time(new.departure),
            Time(new.arrival),
            new.seats,
            new.base_price,
        );
        self.routes.add_flight(&flight);
        info!(flight = %id, origin = %flight.origin, destination = %flight.destination, "flight added");
        self.ledger.insert(flight);
        Ok(id)
    }

    pub fn remove_flight(&mut self, id: FlightId) -> Result<Flight, AirlineError> {
        let flight = self.ledger.remove(id)?;
        self.routes.remove_flight(id);
        self.crew.release_flight(id);
        info!(flight = %id, "flight removed");
        Ok(flight)
    }

    /// Applies `update`. A changed time window releases the flight's crew,
    /// and the route edge is re-priced at the current fare.
    pub fn update_flight(&mut self, id: FlightId, update: FlightUpdate) -> Result<Vec<(PassengerId, u32)>, AirlineError> {
        let flight = self.ledger.get_mut(id)?;
        let departure = update.departure.unwrap_or(flight.departure.0);
        let arrival = update.arrival.unwrap_or(flight.arrival.0);
        let seats = update.seats.unwrap_or(flight.seats_total);
        let base_price = update.base_price.unwrap_or(flight.base_price);
        Self::validate(&flight.origin, &flight.destination, departure, arrival, seats, base_price)?;

        let promoted = flight.resize(seats)?;
        flight.base_price = base_price;
        let window = (Time(departure), Time(arrival));
        let released = if window != flight.window() {
            flight.departure = window.0;
            flight.arrival = window.1;
            std::mem::take(&mut flight.crew)
        } else {
            vec![]
        };
        self.routes.add_flight(flight);

        if !released.is_empty() {
            warn!(flight = %id, crew = ?released, "schedule changed, crew released");
            self.crew.release_flight(id);
        }
        info!(flight = %id, "flight updated");
        Ok(promoted)
    }

    pub fn flight(&self, id: FlightId) -> Result<&Flight, AirlineError> {
        self.ledger.get(id)
    }

    pub fn flights(&self) -> impl Iterator<Item = &Flight> {
        self.ledger.iter()
    }

    pub fn book(&mut self, passenger: &str, flight: FlightId) -> Result<BookingOutcome, AirlineError> {
        let outcome = self.ledger.get_mut(flight)?.book(PassengerId::from(passenger));
        info!(flight = %flight, passenger, ?outcome, "booking");
        Ok(outcome)
    }

    pub fn cancel(&mut self, passenger: &str, flight: FlightId) -> Result<Cancellation, AirlineError> {
        let cancellation = self.ledger.get_mut(flight)?.cancel(&PassengerId::from(passenger))?;
        info!(flight = %flight, passenger, ?cancellation, "booking cancelled");
        Ok(cancellation)
    }

    pub fn search_route(&self, origin: &str, destination: &str) -> Result<Vec<&Flight>, AirlineError> {
        let origin = airport_id(origin);
        let destination = airport_id(destination);
        if origin.is_empty() || destination.is_empty() {
            return Err(AirlineError::InvalidFlight("origin and destination are required".into()));
        }
        Ok(self
            .ledger
            .iter()
            .filter(|f| f.origin == origin && f.destination == destination)
            .collect())
    }

    pub fn search_departures(&self, earliest: Time, latest: Time) -> Result<DepartureSearch<'_>, AirlineError> {
        if earliest > latest {
            return Err(AirlineError::InvalidTimeWindow { earliest, latest });
        }
        let mut search = DepartureSearch {
            flights: vec![],
            skipped: vec![],
        };
        for flight in self.ledger.iter() {
            if !flight.departure().is_within_day() {
                warn!(flight = %flight.id, departure = flight.departure().0, "skipping flight with invalid departure");
                search.skipped.push(AirlineError::InvalidDepartureTime {
                    flight: flight.id,
                    departure: flight.departure().0,
                });
                continue;
            }
            if flight.departure() >= earliest && flight.departure() <= latest {
                search.flights.push(flight);
            }
        }
        debug!(%earliest, %latest, found = search.flights.len(), "departure search");
        Ok(search)
    }

    /// Active bookings held by `passenger`, in flight order.
    pub fn passenger_bookings(&self, passenger: &str) -> Vec<(&Flight, &Booking)> {
        self.ledger
            .iter()
            .flat_map(move |f| {
                f.active_bookings()
                    .filter(move |b| &*b.passenger == passenger)
                    .map(move |b| (f, b))
            })
            .collect()
    }

    pub fn shortest_by_time(&self, from: &str, to: &str) -> Result<Route<u64>, AirlineError> {
        self.routes.shortest_by_time(&airport_id(from), &airport_id(to))
    }

    pub fn shortest_by_price(&self, from: &str, to: &str) -> Result<Route<f64>, AirlineError> {
        self.routes.shortest_by_price(&airport_id(from), &airport_id(to))
    }

    pub fn add_crew(&mut self, name: &str, role: Role) -> CrewId {
        let id = self.crew.add(name, role);
        info!(crew = %id, name, %role, "crew added");
        id
    }

    pub fn crew(&self) -> &CrewRegistry {
        &self.crew
    }

    pub fn assign_crew(&mut self) -> RosterReport {
        let report = rostering::assign_crew_to_all_flights(&mut self.ledger, &mut self.crew);
        self.assert_invariants();
        report
    }

    pub fn duties(&self) -> Vec<Duty> {
        rostering::duties(&self.ledger, &self.crew)
    }

    pub fn crew_vacancy(&self) -> Vacancy {
        rostering::check_crew_vacancy(&self.ledger, &self.crew)
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        debug_assert!(
            self.ledger.iter().all(|f| {
                let pilots = f
                    .crew()
                    .iter()
                    .filter(|c| self.crew.get(**c).is_ok_and(|m| m.role == Role::Pilot))
                    .count();
                pilots <= rostering::PILOTS_PER_FLIGHT
                    && f.crew().len() - pilots <= rostering::ATTENDANTS_PER_FLIGHT
            }),
            "Crew per flight invariant violated"
        );

        debug_assert!(
            self.crew.iter().all(|member| {
                let windows = member
                    .flights()
                    .iter()
                    .filter_map(|fid| self.ledger.get(*fid).ok())
                    .map(|f| f.window())
                    .collect::<Vec<_>>();
                windows.iter().enumerate().all(|(i, a)| {
                    windows.iter().skip(i + 1).all(|b| !Time::is_overlapping(a, b))
                })
            }),
            "Crew duty overlap invariant violated"
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}
}
