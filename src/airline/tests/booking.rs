use crate::airline::FlightUpdate;
use crate::airline::tests::utils::{add_flight, airline, id, seeded};
use crate::error::AirlineError;
use crate::flight::{BookingOutcome, FlightId};
use crate::pricing::dynamic_price;
use crate::time::Time;

#[test]
fn test_full_flight_waitlist_and_promotion() {
    let (mut airline, [del_mum, _, _]) = seeded();

    for (n, p) in ["p1", "p2", "p3"].iter().enumerate() {
        assert_eq!(
            BookingOutcome::Confirmed { seat: n as u32 + 1 },
            airline.book(p, del_mum).unwrap()
        );
    }
    assert_eq!(0, airline.flight(del_mum).unwrap().seats_available());

    assert_eq!(
        BookingOutcome::Waitlisted { position: 1 },
        airline.book("p4", del_mum).unwrap()
    );

    let cancellation = airline.cancel("p1", del_mum).unwrap();
    assert_eq!(1, cancellation.seat);
    assert_eq!(Some(id("p4")), cancellation.promoted);

    let flight = airline.flight(del_mum).unwrap();
    assert_eq!(0, flight.seats_available());
    assert!(flight.waitlist().is_empty());
    assert_eq!(1, airline.passenger_bookings("p4").len());
    assert_eq!(1, airline.passenger_bookings("p4")[0].1.seat);
    assert!(airline.passenger_bookings("p1").is_empty());
}

#[test]
fn test_cancel_without_waitlist_frees_seat() {
    let (mut airline, [_, mum_blr, _]) = seeded();
    airline.book("p1", mum_blr).unwrap();
    let cancellation = airline.cancel("p1", mum_blr).unwrap();
    assert_eq!(None, cancellation.promoted);
    assert_eq!(2, airline.flight(mum_blr).unwrap().seats_available());
}

#[test]
fn test_unknown_flight_and_missing_booking() {
    let (mut airline, [del_mum, _, _]) = seeded();
    assert!(matches!(
        airline.book("p1", FlightId(42)),
        Err(AirlineError::FlightNotFound(FlightId(42)))
    ));
    assert!(matches!(
        airline.cancel("p1", del_mum),
        Err(AirlineError::NoActiveBooking { .. })
    ));
    assert!(matches!(
        airline.cancel("p1", FlightId(42)),
        Err(AirlineError::FlightNotFound(_))
    ));
}

#[test]
fn test_waitlisted_passenger_without_seat_cannot_cancel() {
    let (mut airline, [_, _, del_blr]) = seeded();
    airline.book("p1", del_blr).unwrap();
    airline.book("p2", del_blr).unwrap();
    assert!(airline.cancel("p2", del_blr).is_err());
    assert_eq!(1, airline.flight(del_blr).unwrap().waitlist().len());
}

#[test]
fn test_price_rises_with_bookings() {
    let (mut airline, [del_mum, _, _]) = seeded();
    assert_eq!(5000.0, dynamic_price(airline.flight(del_mum).unwrap()));
    airline.book("p1", del_mum).unwrap();
    airline.book("p2", del_mum).unwrap();
    airline.book("p3", del_mum).unwrap();
    assert_eq!(7500.0, dynamic_price(airline.flight(del_mum).unwrap()));
}

#[test]
fn test_update_grows_seats_for_waitlist() {
    let (mut airline, [_, _, del_blr]) = seeded();
    airline.book("p1", del_blr).unwrap();
    airline.book("p2", del_blr).unwrap();

    let promoted = airline
        .update_flight(
            del_blr,
            FlightUpdate {
                seats: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(vec![(id("p2"), 2)], promoted);
    let flight = airline.flight(del_blr).unwrap();
    assert_eq!(1, flight.seats_available());
    assert_eq!(3, flight.seats_total());
}

#[test]
fn test_update_applies_schedule_and_fare() {
    let (mut airline, [del_mum, _, _]) = seeded();
    airline
        .update_flight(
            del_mum,
            FlightUpdate {
                departure: Some(500),
                arrival: Some(620),
                base_price: Some(4500.0),
                ..Default::default()
            },
        )
        .unwrap();
    let flight = airline.flight(del_mum).unwrap();
    assert_eq!((Time(500), Time(620)), (flight.departure(), flight.arrival()));
    assert_eq!(4500.0, flight.base_price());
    assert_eq!(120, flight.duration());
    assert_eq!(4500.0, dynamic_price(flight));
}

#[test]
fn test_update_rejects_invalid_fields() {
    let (mut airline, [del_mum, _, _]) = seeded();
    airline.book("p1", del_mum).unwrap();
    airline.book("p2", del_mum).unwrap();

    let shrink = FlightUpdate {
        seats: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        airline.update_flight(del_mum, shrink),
        Err(AirlineError::SeatsInUse { occupied: 2, .. })
    ));

    let backwards = FlightUpdate {
        arrival: Some(400),
        ..Default::default()
    };
    assert!(matches!(
        airline.update_flight(del_mum, backwards),
        Err(AirlineError::InvalidFlight(_))
    ));

    let flight = airline.flight(del_mum).unwrap();
    assert_eq!(3, flight.seats_total());
    assert_eq!(Time(660), flight.arrival());

    assert!(matches!(
        airline.update_flight(FlightId(7), FlightUpdate::default()),
        Err(AirlineError::FlightNotFound(_))
    ));
}

#[test]
fn test_add_flight_validation() {
    let mut airline = airline();
    let bad = [
        ("DEL", "DEL", 480, 660, 3, 100.0),
        ("DEL", "MUM", 660, 480, 3, 100.0),
        ("DEL", "MUM", 1400, 1500, 3, 100.0),
        ("DEL", "MUM", 480, 660, 0, 100.0),
        ("DEL", "MUM", 480, 660, 3, -1.0),
        ("", "MUM", 480, 660, 3, 100.0),
    ];
    for (o, d, dep, arr, seats, price) in bad {
        assert!(matches!(
            airline.add_flight(crate::airline::tests::utils::new_flight(o, d, dep, arr, seats, price)),
            Err(AirlineError::InvalidFlight(_))
        ));
    }
    // rejected flights do not consume ids
    assert_eq!(FlightId(1000), add_flight(&mut airline, "del", "mum", 0, 1440, 1, 0.0));
    assert_eq!(id("DEL"), airline.flight(FlightId(1000)).unwrap().origin);
}
