use crate::crew::{CrewId, CrewMember, CrewRegistry, Role};
use crate::error::AirlineError;
use crate::flight::{Flight, FlightId};
use crate::ledger::FlightLedger;
use crate::time::Time;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::{debug, info, warn};

pub const PILOTS_PER_FLIGHT: usize = 2;
pub const ATTENDANTS_PER_FLIGHT: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Staffing {
    AlreadyStaffed,
    Assigned {
        pilots: Vec<CrewId>,
        attendants: Vec<CrewId>,
    },
}

#[derive(Debug, Default)]
pub struct RosterReport {
    pub assigned: Vec<FlightId>,
    pub skipped: Vec<FlightId>,
    pub incomplete: Vec<(FlightId, AirlineError)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrewRequirement {
    pub pilots: usize,
    pub attendants: usize,
}

/// Shortfall between the crew on the books and [`min_crew_required`].
pub type Vacancy = CrewRequirement;

#[derive(Debug, Clone, PartialEq)]
pub struct Duty {
    pub crew: CrewId,
    pub role: Role,
    pub flight: FlightId,
    /// `None` when the flight no longer exists.
    pub window: Option<(Time, Time)>,
}

/// True when none of the member's flights overlaps `window`. Back-to-back
/// flights are fine. Flights missing from the ledger are ignored.
pub fn is_available(member: &CrewMember, ledger: &FlightLedger, window: (Time, Time)) -> bool {
    member
        .flights
        .iter()
        .filter_map(|fid| ledger.get(*fid).ok())
        .all(|f| !Time::is_overlapping(&f.window(), &window))
}

fn staffed_count(flight: &Flight, registry: &CrewRegistry, role: Role) -> usize {
    flight
        .crew
        .iter()
        .filter_map(|cid| registry.get(*cid).ok())
        .filter(|c| c.role == role)
        .count()
}

fn select(
    candidates: &[CrewId],
    registry: &CrewRegistry,
    ledger: &FlightLedger,
    flight: &Flight,
    role: Role,
    needed: usize,
) -> Vec<CrewId> {
    let mut chosen = Vec::with_capacity(needed);
    for c in candidates.iter().filter_map(|cid| registry.get(*cid).ok()) {
        if chosen.len() == needed {
            break;
        }
        // a repeated candidate id fills one slot at most
        if c.role != role || flight.crew.contains(&c.id) || chosen.contains(&c.id) {
            continue;
        }
        let free = is_available(c, ledger, flight.window());
        debug!(flight = %flight.id, crew = %c.id, free, "crew candidate");
        if free {
            chosen.push(c.id);
        }
    }
    chosen
}

/// Greedily staffs one flight from the candidate lists, in list order.
/// Either both role quotas are met and committed, or nothing changes.
pub fn assign_crew_to_flight(
    ledger: &mut FlightLedger,
    registry: &mut CrewRegistry,
    flight_id: FlightId,
    pilots: &[CrewId],
    attendants: &[CrewId],
) -> Result<Staffing, AirlineError> {
    let flight = ledger.get(flight_id)?;
    let have_pilots = staffed_count(flight, registry, Role::Pilot);
    let have_attendants = staffed_count(flight, registry, Role::Attendant);
    if have_pilots >= PILOTS_PER_FLIGHT && have_attendants >= ATTENDANTS_PER_FLIGHT {
        debug!(flight = %flight_id, "already staffed");
        return Ok(Staffing::AlreadyStaffed);
    }

    let need_pilots = PILOTS_PER_FLIGHT.saturating_sub(have_pilots);
    let need_attendants = ATTENDANTS_PER_FLIGHT.saturating_sub(have_attendants);
    let chosen_pilots = select(pilots, registry, ledger, flight, Role::Pilot, need_pilots);
    let chosen_attendants = select(
        attendants,
        registry,
        ledger,
        flight,
        Role::Attendant,
        need_attendants,
    );

    let pilots_short = need_pilots - chosen_pilots.len();
    let attendants_short = need_attendants - chosen_attendants.len();
    if pilots_short > 0 || attendants_short > 0 {
        warn!(flight = %flight_id, pilots_short, attendants_short, "crew assignment incomplete");
        return Err(AirlineError::CrewAssignmentIncomplete {
            flight: flight_id,
            pilots_short,
            attendants_short,
        });
    }

    let flight = ledger.get_mut(flight_id)?;
    for cid in chosen_pilots.iter().chain(chosen_attendants.iter()) {
        registry.get_mut(*cid)?.flights.insert(flight_id);
        flight.crew.push(*cid);
    }
    info!(flight = %flight_id, pilots = ?chosen_pilots, attendants = ?chosen_attendants, "crew assigned");
    Ok(Staffing::Assigned {
        pilots: chosen_pilots,
        attendants: chosen_attendants,
    })
}

/// One left-to-right pass over the ledger in id order. A crew member taken
/// by an earlier flight is not reconsidered, so later flights may go short
/// even when a different pairing would staff everything.
pub fn assign_crew_to_all_flights(ledger: &mut FlightLedger, registry: &mut CrewRegistry) -> RosterReport {
    let pilots = registry.ids(Role::Pilot);
    let attendants = registry.ids(Role::Attendant);
    let flight_ids = ledger.iter().map(|f| f.id).collect::<Vec<_>>();

    let mut report = RosterReport::default();
    for flight_id in flight_ids {
        match assign_crew_to_flight(ledger, registry, flight_id, &pilots, &attendants) {
            Ok(Staffing::Assigned { .. }) => report.assigned.push(flight_id),
            Ok(Staffing::AlreadyStaffed) => report.skipped.push(flight_id),
            Err(err) => report.incomplete.push((flight_id, err)),
        }
    }
    report
}

/// Distinct crew needed to fly every flight when a crew member can take
/// another flight as soon as theirs lands. Greedy interval partitioning:
/// flights in departure order reuse crew whose free-at time has passed.
pub fn min_crew_required<'a>(flights: impl IntoIterator<Item = &'a Flight>) -> CrewRequirement {
    let mut ordered = flights.into_iter().collect::<Vec<_>>();
    ordered.sort_by_key(|f| (f.departure(), f.id));

    let mut pilots_free_at: BinaryHeap<Reverse<Time>> = BinaryHeap::new();
    let mut attendants_free_at: BinaryHeap<Reverse<Time>> = BinaryHeap::new();
    let mut required = CrewRequirement::default();

    let reuse = |free_at: &mut BinaryHeap<Reverse<Time>>, departure: Time, quota: usize| {
        let mut reused = 0;
        while reused < quota && free_at.peek().is_some_and(|Reverse(t)| *t <= departure) {
            free_at.pop();
            reused += 1;
        }
        reused
    };

    for flight in ordered {
        required.pilots += PILOTS_PER_FLIGHT - reuse(&mut pilots_free_at, flight.departure(), PILOTS_PER_FLIGHT);
        required.attendants +=
            ATTENDANTS_PER_FLIGHT - reuse(&mut attendants_free_at, flight.departure(), ATTENDANTS_PER_FLIGHT);
        pilots_free_at.extend(std::iter::repeat_n(Reverse(flight.arrival()), PILOTS_PER_FLIGHT));
        attendants_free_at.extend(std::iter::repeat_n(Reverse(flight.arrival()), ATTENDANTS_PER_FLIGHT));
    }
    required
}

pub fn check_crew_vacancy(ledger: &FlightLedger, registry: &CrewRegistry) -> Vacancy {
    let required = min_crew_required(ledger.iter());
    Vacancy {
        pilots: required.pilots.saturating_sub(registry.count(Role::Pilot)),
        attendants: required.attendants.saturating_sub(registry.count(Role::Attendant)),
    }
}

/// Every (crew member, assigned flight) pair, by crew id then flight id.
pub fn duties(ledger: &FlightLedger, registry: &CrewRegistry) -> Vec<Duty> {
    registry
        .iter()
        .flat_map(|c| {
            c.flights.iter().map(move |fid| Duty {
                crew: c.id,
                role: c.role,
                flight: *fid,
                window: ledger.get(*fid).ok().map(|f| f.window()),
            })
        })
        .collect()
}
