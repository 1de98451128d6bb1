use crate::error::AirlineError;
use crate::flight::FlightId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CrewId(pub u32);

impl fmt::Display for CrewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Pilot,
    Attendant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Pilot => write!(f, "Pilot"),
            Role::Attendant => write!(f, "Attendant"),
        }
    }
}

impl FromStr for Role {
    type Err = AirlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pilot" => Ok(Role::Pilot),
            "attendant" => Ok(Role::Attendant),
            _ => Err(AirlineError::UnknownRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrewMember {
    pub id: CrewId,
    pub name: String,
    pub role: Role,
    pub(crate) flights: BTreeSet<FlightId>,
}

impl CrewMember {
    pub fn flights(&self) -> &BTreeSet<FlightId> {
        &self.flights
    }
}

/// Crew members by ascending id; ids come from a counter owned here.
pub struct CrewRegistry {
    members: BTreeMap<CrewId, CrewMember>,
    next_id: u32,
}

impl CrewRegistry {
    pub fn new(first_id: u32) -> CrewRegistry {
        CrewRegistry {
            members: BTreeMap::new(),
            next_id: first_id,
        }
    }

    pub fn add(&mut self, name: &str, role: Role) -> CrewId {
        let id = CrewId(self.next_id);
        self.next_id += 1;
        self.members.insert(
            id,
            CrewMember {
                id,
                name: name.to_string(),
                role,
                flights: BTreeSet::new(),
            },
        );
        id
    }

    pub fn get(&self, id: CrewId) -> Result<&CrewMember, AirlineError> {
        self.members.get(&id).ok_or(AirlineError::CrewNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: CrewId) -> Result<&mut CrewMember, AirlineError> {
        self.members.get_mut(&id).ok_or(AirlineError::CrewNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CrewMember> {
        self.members.values()
    }

    /// Ids holding `role`, ascending.
    pub fn ids(&self, role: Role) -> Vec<CrewId> {
        self.iter().filter(|c| c.role == role).map(|c| c.id).collect()
    }

    pub fn count(&self, role: Role) -> usize {
        self.iter().filter(|c| c.role == role).count()
    }

    /// Drops `flight` from every duty set.
    pub fn release_flight(&mut self, flight: FlightId) {
        self.members.values_mut().for_each(|c| {
            c.flights.remove(&flight);
        });
    }
}
