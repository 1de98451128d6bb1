use crate::airport::AirportId;
use crate::crew::CrewId;
use crate::error::AirlineError;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlightId(pub u32);

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type PassengerId = Arc<str>;

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub passenger: PassengerId,
    /// 1-indexed.
    pub seat: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Confirmed { seat: u32 },
    /// 1-based position in the waitlist.
    Waitlisted { position: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cancellation {
    pub seat: u32,
    pub promoted: Option<PassengerId>,
}

#[derive(Debug, Clone)]
pub struct Flight {
    pub id: FlightId,
    pub origin: AirportId,
    pub destination: AirportId,
    pub(crate) departure: Time,
    pub(crate) arrival: Time,
    pub(crate) base_price: f64,
    pub(crate) seats_total: u32,
    pub(crate) seats_available: u32,
    pub(crate) seat_map: Vec<bool>,
    pub(crate) bookings: Vec<Booking>,
    pub(crate) waitlist: VecDeque<PassengerId>,
    pub(crate) crew: Vec<CrewId>,
}

impl Flight {
    pub fn new(
        id: FlightId,
        origin: AirportId,
        destination: AirportId,
        departure: Time,
        arrival: Time,
        seats: u32,
        base_price: f64,
    ) -> Flight {
        Flight {
            id,
            origin,
            destination,
            departure,
            arrival,
            base_price,
            seats_total: seats,
            seats_available: seats,
            seat_map: vec![false; seats as usize],
            bookings: vec![],
            waitlist: VecDeque::new(),
            crew: vec![],
        }
    }

    pub fn departure(&self) -> Time {
        self.departure
    }

    pub fn arrival(&self) -> Time {
        self.arrival
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn seats_total(&self) -> u32 {
        self.seats_total
    }

    pub fn seats_available(&self) -> u32 {
        self.seats_available
    }

    pub fn duration(&self) -> u64 {
        self.arrival - self.departure
    }

    pub fn window(&self) -> (Time, Time) {
        (self.departure, self.arrival)
    }

    /// Fraction of seats held by active bookings, in `[0, 1]`.
    pub fn occupancy(&self) -> f64 {
        if self.seats_total == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.seats_available) / f64::from(self.seats_total)
    }

    pub fn active_bookings(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter().filter(|b| b.active)
    }

    pub fn waitlist(&self) -> &VecDeque<PassengerId> {
        &self.waitlist
    }

    pub fn crew(&self) -> &[CrewId] {
        &self.crew
    }

    /// Claims the lowest-numbered free seat.
    pub fn reserve_seat(&mut self) -> Result<u32, AirlineError> {
        let idx = self
            .seat_map
            .iter()
            .position(|taken| !taken)
            .ok_or(AirlineError::NoSeatAvailable(self.id))?;
        self.seat_map[idx] = true;
        self.seats_available -= 1;
        Ok(idx as u32 + 1)
    }

    pub fn book(&mut self, passenger: PassengerId) -> BookingOutcome {
        let outcome = match self.reserve_seat() {
            Ok(seat) => {
                self.bookings.push(Booking {
                    passenger,
                    seat,
                    active: true,
                });
                BookingOutcome::Confirmed { seat }
            }
            Err(_) => {
                self.waitlist.push_back(passenger);
                BookingOutcome::Waitlisted {
                    position: self.waitlist.len(),
                }
            }
        };
        self.assert_invariants();
        outcome
    }

    pub fn cancel(&mut self, passenger: &PassengerId) -> Result<Cancellation, AirlineError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.active && b.passenger == *passenger)
            .ok_or_else(|| AirlineError::NoActiveBooking {
                passenger: passenger.clone(),
                flight: self.id,
            })?;
        booking.active = false;
        let seat = booking.seat;

        // while someone is waiting the freed seat goes straight to them
        let promoted = match self.waitlist.pop_front() {
            Some(next) => {
                debug!(flight = %self.id, seat, passenger = %next, "promoted from waitlist");
                self.bookings.push(Booking {
                    passenger: next.clone(),
                    seat,
                    active: true,
                });
                Some(next)
            }
            None => {
                self.seat_map[seat as usize - 1] = false;
                self.seats_available += 1;
                None
            }
        };
        self.assert_invariants();
        Ok(Cancellation { seat, promoted })
    }

    /// Changes the seat count, keeping every active booking on its seat.
    /// New seats are offered to the waitlist first.
    pub fn resize(&mut self, seats: u32) -> Result<Vec<(PassengerId, u32)>, AirlineError> {
        let highest = self.active_bookings().map(|b| b.seat).max().unwrap_or(0);
        if seats < highest {
            return Err(AirlineError::SeatsInUse {
                flight: self.id,
                seats,
                occupied: highest,
            });
        }
        self.seat_map.resize(seats as usize, false);
        self.seats_total = seats;
        self.seats_available = self.seat_map.iter().filter(|taken| !**taken).count() as u32;

        let mut promoted = vec![];
        while !self.waitlist.is_empty() {
            let Ok(seat) = self.reserve_seat() else { break };
            if let Some(next) = self.waitlist.pop_front() {
                self.bookings.push(Booking {
                    passenger: next.clone(),
                    seat,
                    active: true,
                });
                promoted.push((next, seat));
            }
        }
        self.assert_invariants();
        Ok(promoted)
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        let taken = self.seat_map.iter().filter(|t| **t).count() as u32;
        debug_assert_eq!(
            self.seats_available,
            self.seats_total - taken,
            "Seat availability <-> seat map invariant violated"
        );
        debug_assert!(
            self.seat_map.iter().enumerate().all(|(idx, taken)| {
                let holders = self
                    .active_bookings()
                    .filter(|b| b.seat as usize == idx + 1)
                    .count();
                if *taken { holders == 1 } else { holders == 0 }
            }),
            "Seat map <-> active booking invariant violated"
        );
        debug_assert!(
            self.waitlist.is_empty() || self.seats_available == 0,
            "Waitlist while seats are free"
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}
}
