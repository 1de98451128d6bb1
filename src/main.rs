use crate::airline::{Airline, FlightUpdate};
use crate::config::NewFlight;
use crate::crew::Role;
use crate::error::AirlineError;
use crate::flight::{BookingOutcome, FlightId};
use crate::report::{BookingRow, CrewRow, DutyRow, FlightRow, OccupancyRow, WaitlistRow};
use crate::time::Time;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

mod airline;
mod airport;
mod config;
mod crew;
mod error;
mod flight;
mod ledger;
mod network;
mod pricing;
mod report;
mod rostering;
mod time;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Log filter used when RUST_LOG is unset, e.g. "info" or "flightdesk=debug"
    #[arg(short, long, value_name = "LEVEL", default_value = "warn")]
    log: String,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

const COMMANDS: &[&str] = &[
    "ls", "show", "route", "window", "book", "cancel", "mine", "fastest", "cheapest", "add", "rm", "update",
    "crew", "hire", "assign", "duties", "vacancy", "occupancy", "waitlist", "help", "exit",
];

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let Ok(mut pager) = pager else {
        println!("{}", content);
        return;
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    let _ = pager.wait();
}

fn print_table<R: Tabled>(rows: Vec<R>, empty: &str) {
    if rows.is_empty() {
        println!("{}", empty);
        return;
    }
    let long = rows.len() > 20;
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if long {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn fail(err: AirlineError) {
    println!("{}", err.to_string().red());
}

fn parse<T: std::str::FromStr>(arg: Option<&&str>) -> Option<T> {
    arg.and_then(|s| s.parse().ok())
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  ls                          - List all flights");
    println!("  show <id>                   - One flight with its crew");
    println!("  route <from> <to>           - Flights flying <from> -> <to>");
    println!("  window <from> <to>          - Flights departing between two minute marks");
    println!("  book <passenger> <id>       - Book a seat, or join the waitlist when full");
    println!("  cancel <passenger> <id>     - Cancel a booking; the waitlist head takes the seat");
    println!("  mine <passenger>            - Active bookings of a passenger");
    println!("  fastest <from> <to>         - Minimum travel time route");
    println!("  cheapest <from> <to>        - Minimum price route");
    println!("  add <from> <to> <dep> <arr> <seats> <price> - Add a flight");
    println!("  rm <id>                     - Remove a flight");
    println!("  update <id> <dep> <arr> <seats> <price>     - Update a flight");
    println!("  crew                        - List crew");
    println!("  hire <name> <Pilot|Attendant> - Add a crew member");
    println!("  assign                      - Assign crew to every flight");
    println!("  duties                      - Crew duty roster");
    println!("  vacancy                     - Extra crew needed to cover the schedule");
    println!("  occupancy                   - Flight occupancy report");
    println!("  waitlist                    - Waitlist report");
    println!("  help / ?                    - Show this help menu");
    println!("  exit / quit                 - Exit\n");
}

fn execute(airline: &mut Airline, parts: &[&str]) {
    match parts[0] {
        "ls" => print_table(airline.flights().map(FlightRow::from).collect(), "No flights available."),
        "show" => match parse::<u32>(parts.get(1)) {
            Some(id) => match airline.flight(FlightId(id)) {
                Ok(flight) => {
                    print_table(vec![FlightRow::from(flight)], "");
                    let crew = flight.crew().iter().map(|c| c.to_string()).collect::<Vec<_>>();
                    println!("Crew: {}", if crew.is_empty() { "none".to_string() } else { crew.join(", ") });
                }
                Err(e) => fail(e),
            },
            None => println!("Usage: show <flight_id>"),
        },
        "route" => match (parts.get(1), parts.get(2)) {
            (Some(from), Some(to)) => match airline.search_route(from, to) {
                Ok(flights) => print_table(
                    flights.into_iter().map(FlightRow::from).collect(),
                    &format!("No flights found from {} to {}.", from, to),
                ),
                Err(e) => fail(e),
            },
            _ => println!("Usage: route <from> <to>"),
        },
        "window" => match (parse::<u64>(parts.get(1)), parse::<u64>(parts.get(2))) {
            (Some(from), Some(to)) => match airline.search_departures(Time(from), Time(to)) {
                Ok(search) => {
                    search.skipped.into_iter().for_each(fail);
                    print_table(
                        search.flights.into_iter().map(FlightRow::from).collect(),
                        "No flights found within the specified time range.",
                    )
                }
                Err(e) => fail(e),
            },
            _ => println!("Usage: window <from> <to>"),
        },
        "book" => match (parts.get(1), parse::<u32>(parts.get(2))) {
            (Some(passenger), Some(id)) => match airline.book(passenger, FlightId(id)) {
                Ok(BookingOutcome::Confirmed { seat }) => {
                    println!("{} Flight {}, seat #{}", "Seat booked!".green(), id, seat)
                }
                Ok(BookingOutcome::Waitlisted { position }) => println!(
                    "{} Waitlist position {}.",
                    "No seats available.".yellow(),
                    position
                ),
                Err(e) => fail(e),
            },
            _ => println!("Usage: book <passenger> <flight_id>"),
        },
        "cancel" => match (parts.get(1), parse::<u32>(parts.get(2))) {
            (Some(passenger), Some(id)) => match airline.cancel(passenger, FlightId(id)) {
                Ok(cancellation) => {
                    println!("{}", "Booking cancelled.".green());
                    if let Some(next) = cancellation.promoted {
                        println!("Waitlisted passenger {} booked on seat #{}", next, cancellation.seat);
                    }
                }
                Err(e) => fail(e),
            },
            _ => println!("Usage: cancel <passenger> <flight_id>"),
        },
        "mine" => match parts.get(1) {
            Some(passenger) => print_table(
                airline.passenger_bookings(passenger).into_iter().map(BookingRow::from).collect(),
                "No bookings available.",
            ),
            None => println!("Usage: mine <passenger>"),
        },
        "fastest" => match (parts.get(1), parts.get(2)) {
            (Some(from), Some(to)) => match airline.shortest_by_time(from, to) {
                Ok(route) => println!("Shortest route ({} mins): {}", route.total, route.path.join(" -> ")),
                Err(e) => fail(e),
            },
            _ => println!("Usage: fastest <from> <to>"),
        },
        "cheapest" => match (parts.get(1), parts.get(2)) {
            (Some(from), Some(to)) => match airline.shortest_by_price(from, to) {
                Ok(route) => println!("Cheapest route ({:.2}): {}", route.total, route.path.join(" -> ")),
                Err(e) => fail(e),
            },
            _ => println!("Usage: cheapest <from> <to>"),
        },
        "add" => match (
            parts.get(1),
            parts.get(2),
            parse::<u64>(parts.get(3)),
            parse::<u64>(parts.get(4)),
            parse::<u32>(parts.get(5)),
            parse::<f64>(parts.get(6)),
        ) {
            (Some(from), Some(to), Some(departure), Some(arrival), Some(seats), Some(base_price)) => {
                let new = NewFlight {
                    origin: from.to_string(),
                    destination: to.to_string(),
                    departure,
                    arrival,
                    seats,
                    base_price,
                };
                match airline.add_flight(new) {
                    Ok(id) => println!("Flight added: ID {}", id),
                    Err(e) => fail(e),
                }
            }
            _ => println!("Usage: add <from> <to> <dep> <arr> <seats> <price>"),
        },
        "rm" => match parse::<u32>(parts.get(1)) {
            Some(id) => match airline.remove_flight(FlightId(id)) {
                Ok(_) => println!("Flight removed."),
                Err(e) => fail(e),
            },
            None => println!("Usage: rm <flight_id>"),
        },
        "update" => match parse::<u32>(parts.get(1)) {
            Some(id) => {
                let update = FlightUpdate {
                    departure: parse(parts.get(2)),
                    arrival: parse(parts.get(3)),
                    seats: parse(parts.get(4)),
                    base_price: parse(parts.get(5)),
                };
                match airline.update_flight(FlightId(id), update) {
                    Ok(promoted) => {
                        println!("Flight updated.");
                        for (passenger, seat) in promoted {
                            println!("Waitlisted passenger {} booked on seat #{}", passenger, seat);
                        }
                    }
                    Err(e) => fail(e),
                }
            }
            None => println!("Usage: update <flight_id> <dep> <arr> <seats> <price>"),
        },
        "crew" => print_table(airline.crew().iter().map(CrewRow::from).collect(), "No crew on the books."),
        "hire" => match (parts.get(1), parts.get(2).map(|r| r.parse::<Role>())) {
            (Some(name), Some(Ok(role))) => {
                let id = airline.add_crew(name, role);
                println!("Crew added: ID {}, {}, {}", id, name, role);
            }
            (_, Some(Err(e))) => fail(e),
            _ => println!("Usage: hire <name> <Pilot|Attendant>"),
        },
        "assign" => {
            let report = airline.assign_crew();
            for id in &report.assigned {
                println!("{} {}", "Crew assigned to flight".green(), id);
            }
            for id in &report.skipped {
                println!("Flight {}: already has a full crew. Skipping assignment.", id);
            }
            for (_, err) in report.incomplete {
                fail(err);
            }
        }
        "duties" => print_table(
            airline.duties().iter().map(DutyRow::from).collect(),
            "No flights assigned.",
        ),
        "vacancy" => {
            let vacancy = airline.crew_vacancy();
            println!("Add {} more pilots", vacancy.pilots);
            println!("Add {} more attendants", vacancy.attendants);
        }
        "occupancy" => print_table(airline.flights().map(OccupancyRow::from).collect(), "No flights available."),
        "waitlist" => print_table(airline.flights().map(WaitlistRow::from).collect(), "No flights available."),
        "help" | "?" => print_help(),
        _ => println!("Unknown command: {}", parts[0]),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut airline = Airline::load_from_file(&args.scenario.to_string_lossy())?;
    println!(
        "Flight desk online. Loaded {} flights and {} crew from {}",
        airline.flights().count(),
        airline.crew().iter().count(),
        args.scenario.display()
    );

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                if matches!(parts[0], "exit" | "quit") {
                    break;
                }
                execute(&mut airline, &parts);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
