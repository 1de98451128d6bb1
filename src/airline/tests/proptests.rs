use crate::airline::tests::utils::{add_flight, airline, arb_passenger, hire};
use crate::crew::Role;
use crate::time::Time;
use proptest::prelude::*;
use proptest::proptest;

#[derive(Debug, Clone)]
enum Op {
    Book(&'static str),
    Cancel(&'static str),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_passenger().prop_map(Op::Book),
        arb_passenger().prop_map(Op::Cancel),
    ]
}

proptest! {
    #[test]
    fn test_seat_accounting_invariant(
        seats in 1..5u32,
        ops in prop::collection::vec(arb_op(), 1..40)
    ) {
        let mut airline = airline();
        let flight = add_flight(&mut airline, "DEL", "MUM", 480, 660, seats, 1000.0);

        for op in ops {
            let waiting_before = airline.flight(flight).unwrap().waitlist().len();
            let available_before = airline.flight(flight).unwrap().seats_available();
            match op {
                Op::Book(p) => { airline.book(p, flight).unwrap(); }
                Op::Cancel(p) => {
                    if let Ok(cancellation) = airline.cancel(p, flight) {
                        let f = airline.flight(flight).unwrap();
                        if waiting_before > 0 {
                            prop_assert!(cancellation.promoted.is_some());
                            prop_assert_eq!(waiting_before - 1, f.waitlist().len());
                            prop_assert_eq!(available_before, f.seats_available());
                        } else {
                            prop_assert_eq!(available_before + 1, f.seats_available());
                        }
                    }
                }
            }

            let f = airline.flight(flight).unwrap();
            prop_assert_eq!(
                f.seats_total(),
                f.seats_available() + f.active_bookings().count() as u32
            );
            prop_assert!(f.waitlist().is_empty() || f.seats_available() == 0);
        }
    }

    #[test]
    fn test_crew_never_double_booked(
        flights in prop::collection::vec((0..1300u64, 10..140u64), 1..25),
        pilots in 0..8usize,
        attendants in 0..8usize,
        rounds in 1..3usize,
    ) {
        let mut airline = airline();
        for (dep, dur) in flights {
            add_flight(&mut airline, "DEL", "MUM", dep, dep + dur, 3, 1000.0);
        }
        hire(&mut airline, pilots, attendants);
        for _ in 0..rounds {
            airline.assign_crew();
        }

        for member in airline.crew().iter() {
            let windows = member.flights().iter()
                .map(|fid| airline.flight(*fid).unwrap().window())
                .collect::<Vec<_>>();
            for (i, a) in windows.iter().enumerate() {
                for b in windows.iter().skip(i + 1) {
                    prop_assert!(
                        !Time::is_overlapping(a, b),
                        "\nCrew {} double-booked: {}-{} vs {}-{}",
                        member.id, a.0, a.1, b.0, b.1
                    );
                }
            }
        }

        let required = crate::rostering::min_crew_required(airline.flights());
        for f in airline.flights() {
            let on_board = f.crew().iter()
                .map(|c| airline.crew().get(*c).unwrap().role)
                .collect::<Vec<_>>();
            let p = on_board.iter().filter(|r| **r == Role::Pilot).count();
            let a = on_board.len() - p;
            prop_assert!((p, a) == (0, 0) || (p, a) == (2, 2));
        }
        // a fully staffed network never uses fewer crew than the estimate
        if airline.flights().all(|f| f.crew().len() == 4) {
            let used_pilots = airline.crew().iter()
                .filter(|c| c.role == Role::Pilot && !c.flights().is_empty())
                .count();
            prop_assert!(used_pilots >= required.pilots);
        }
    }
}
