use crate::crew::CrewMember;
use crate::flight::{Booking, Flight};
use crate::pricing::dynamic_price;
use crate::rostering::Duty;
use tabled::Tabled;

#[derive(Tabled)]
pub struct FlightRow {
    pub id: u32,
    pub route: String,
    pub departure: String,
    pub arrival: String,
    pub seats: String,
    pub price: String,
    pub waitlist: usize,
}

impl From<&Flight> for FlightRow {
    fn from(f: &Flight) -> Self {
        FlightRow {
            id: f.id.0,
            route: format!("{}->{}", f.origin, f.destination),
            departure: f.departure().to_string(),
            arrival: f.arrival().to_string(),
            seats: format!("{}/{}", f.seats_available(), f.seats_total()),
            price: format!("{:.2}", dynamic_price(f)),
            waitlist: f.waitlist().len(),
        }
    }
}

#[derive(Tabled)]
pub struct BookingRow {
    pub flight: u32,
    pub route: String,
    pub departure: String,
    pub seat: u32,
}

impl From<(&Flight, &Booking)> for BookingRow {
    fn from((f, b): (&Flight, &Booking)) -> Self {
        BookingRow {
            flight: f.id.0,
            route: format!("{}->{}", f.origin, f.destination),
            departure: f.departure().to_string(),
            seat: b.seat,
        }
    }
}

#[derive(Tabled)]
pub struct CrewRow {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub flights: usize,
}

impl From<&CrewMember> for CrewRow {
    fn from(c: &CrewMember) -> Self {
        CrewRow {
            id: c.id.0,
            name: c.name.clone(),
            role: c.role.to_string(),
            flights: c.flights().len(),
        }
    }
}

#[derive(Tabled)]
pub struct DutyRow {
    pub crew: u32,
    pub role: String,
    pub flight: u32,
    pub departure: String,
    pub arrival: String,
}

impl From<&Duty> for DutyRow {
    fn from(d: &Duty) -> Self {
        let (departure, arrival) = match d.window {
            Some((dep, arr)) => (dep.to_string(), arr.to_string()),
            None => ("-".to_string(), "(details not found)".to_string()),
        };
        DutyRow {
            crew: d.crew.0,
            role: d.role.to_string(),
            flight: d.flight.0,
            departure,
            arrival,
        }
    }
}

#[derive(Tabled)]
pub struct OccupancyRow {
    pub flight: u32,
    pub held: String,
    pub full: String,
}

impl From<&Flight> for OccupancyRow {
    fn from(f: &Flight) -> Self {
        OccupancyRow {
            flight: f.id.0,
            held: format!("{}/{}", f.seats_total() - f.seats_available(), f.seats_total()),
            full: format!("{:.1}%", f.occupancy() * 100.0),
        }
    }
}

#[derive(Tabled)]
pub struct WaitlistRow {
    pub flight: u32,
    pub waiting: usize,
    pub next: String,
}

impl From<&Flight> for WaitlistRow {
    fn from(f: &Flight) -> Self {
        WaitlistRow {
            flight: f.id.0,
            waiting: f.waitlist().len(),
            next: f.waitlist().front().map(|p| p.to_string()).unwrap_or_default(),
        }
    }
}
