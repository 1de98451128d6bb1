use crate::flight::Flight;

/// Surcharge applied at full occupancy, as a fraction of the base price.
pub const MAX_SURCHARGE: f64 = 0.5;

/// Current fare: the base price at an empty flight, rising linearly to
/// `1 + MAX_SURCHARGE` times the base price when every seat is held.
pub fn dynamic_price(flight: &Flight) -> f64 {
    flight.base_price() * (1.0 + flight.occupancy() * MAX_SURCHARGE)
}
