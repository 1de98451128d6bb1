use crate::airline::Airline;
use crate::config::{NewFlight, Settings};
use crate::crew::{CrewId, Role};
use crate::flight::FlightId;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn airline() -> Airline {
    Airline::new(Settings::default())
}

pub fn new_flight(
    origin: &str,
    destination: &str,
    departure: u64,
    arrival: u64,
    seats: u32,
    base_price: f64,
) -> NewFlight {
    NewFlight {
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure,
        arrival,
        seats,
        base_price,
    }
}

pub fn add_flight(
    airline: &mut Airline,
    origin: &str,
    destination: &str,
    departure: u64,
    arrival: u64,
    seats: u32,
    base_price: f64,
) -> FlightId {
    airline
        .add_flight(new_flight(origin, destination, departure, arrival, seats, base_price))
        .unwrap()
}

/// Adds `pilots` pilots then `attendants` attendants.
pub fn hire(airline: &mut Airline, pilots: usize, attendants: usize) -> (Vec<CrewId>, Vec<CrewId>) {
    let p = (0..pilots)
        .map(|n| airline.add_crew(&format!("Pilot {}", n + 1), Role::Pilot))
        .collect();
    let a = (0..attendants)
        .map(|n| airline.add_crew(&format!("Attendant {}", n + 1), Role::Attendant))
        .collect();
    (p, a)
}

pub fn assigned(airline: &Airline, crew: CrewId) -> Vec<FlightId> {
    airline.crew().get(crew).unwrap().flights().iter().copied().collect()
}

/// The three-flight network the desk ships with.
pub fn seeded() -> (Airline, [FlightId; 3]) {
    let mut airline = airline();
    let del_mum = add_flight(&mut airline, "DEL", "MUM", 480, 660, 3, 5000.0);
    let mum_blr = add_flight(&mut airline, "MUM", "BLR", 700, 900, 2, 4000.0);
    let del_blr = add_flight(&mut airline, "DEL", "BLR", 500, 900, 1, 7000.0);
    (airline, [del_mum, mum_blr, del_blr])
}

pub fn arb_passenger() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("asha"),
        Just("ben"),
        Just("chen"),
        Just("dara"),
        Just("eli"),
    ]
}
