use crate::error::AirlineError;
use crate::flight::{Flight, FlightId};

/// Canonical flight store. Flights are kept sorted by id so lookups are a
/// binary search; ids come from a counter owned here and are never reused.
pub struct FlightLedger {
    flights: Vec<Flight>,
    next_id: u32,
}

impl FlightLedger {
    pub fn new(first_id: u32) -> FlightLedger {
        FlightLedger {
            flights: vec![],
            next_id: first_id,
        }
    }

    pub fn next_id(&mut self) -> FlightId {
        let id = FlightId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Stores a flight built with an id from [`FlightLedger::next_id`].
    /// Fresh ids are always the largest, so the vector stays sorted.
    pub fn insert(&mut self, flight: Flight) {
        debug_assert!(
            self.flights.last().is_none_or(|last| last.id < flight.id),
            "flight {} inserted out of order",
            flight.id
        );
        self.flights.push(flight);
    }

    pub fn remove(&mut self, id: FlightId) -> Result<Flight, AirlineError> {
        let idx = self.position(id)?;
        Ok(self.flights.remove(idx))
    }

    pub fn get(&self, id: FlightId) -> Result<&Flight, AirlineError> {
        self.position(id).map(|idx| &self.flights[idx])
    }

    pub fn get_mut(&mut self, id: FlightId) -> Result<&mut Flight, AirlineError> {
        self.position(id).map(|idx| &mut self.flights[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flight> {
        self.flights.iter()
    }

    fn position(&self, id: FlightId) -> Result<usize, AirlineError> {
        self.flights
            .binary_search_by_key(&id, |f| f.id)
            .map_err(|_| AirlineError::FlightNotFound(id))
    }
}
