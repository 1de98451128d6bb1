use crate::crew::Role;
use serde::Deserialize;

/// Identifier bases for a fresh airline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub first_flight_id: u32,
    pub first_crew_id: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            first_flight_id: 1000,
            first_crew_id: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewFlight {
    pub origin: String,
    pub destination: String,
    /// Minutes since midnight.
    pub departure: u64,
    pub arrival: u64,
    pub seats: u32,
    pub base_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCrew {
    pub name: String,
    pub role: Role,
}

/// Seed data read at startup.
#[derive(Debug, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub flights: Vec<NewFlight>,
    #[serde(default)]
    pub crew: Vec<NewCrew>,
}
