use clap::Parser;
use colored::Colorize;
use flightwise::offer::{FlightOffer, OfferRow};
use flightwise::query::{sparkline, summarize, HourWindow, MaxStops, SortKey};
use flightwise::scenario::Scenario;
use flightwise::session::Session;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::settings::Style;
use tabled::Tabled;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,
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

#[derive(Tabled)]
struct WatchRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Trend")]
    trend: String,
    #[tabled(rename = "Advice")]
    advice: String,
}

impl From<&FlightOffer> for WatchRow {
    fn from(offer: &FlightOffer) -> Self {
        WatchRow {
            id: offer.id.to_string(),
            route: format!("{} → {}", offer.departure.airport, offer.arrival.airport),
            price: format!("${:.0}", offer.price),
            target: offer
                .target_price
                .map(|t| format!("${:.0}", t))
                .unwrap_or_else(|| "-".to_string()),
            trend: sparkline(&offer.price_history)
                .map(|line| line.bars())
                .unwrap_or_default(),
            advice: format!("{} ({} conf)", offer.recommendation, offer.confidence),
        }
    }
}

fn paginate(content: String) {
    let spawned = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match spawned {
        Ok(pager) => pager,
        Err(_) => {
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn print_table<R: Tabled>(rows: Vec<R>) {
    let count = rows.len();
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if count > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn print_error(err: impl std::fmt::Display) {
    println!("{} {}", "Error:".red().bold(), err);
}

fn parse_window(from: Option<&&str>, to: Option<&&str>) -> Option<HourWindow> {
    match (from, to) {
        (Some(&"any"), None) => Some(HourWindow::Any),
        (Some(from), Some(to)) => Some(HourWindow::Hours {
            start: from.parse().ok()?,
            end: to.parse().ok()?,
        }),
        _ => None,
    }
}

fn apply_filter(session: &mut Session, parts: &[&str]) {
    let criteria = &mut session.criteria;
    match parts {
        ["price", max] => match max.parse::<f64>() {
            Ok(v) => criteria.max_price = Some(v),
            Err(_) => println!("Usage: filter price <max>"),
        },
        ["min", min] => match min.parse::<f64>() {
            Ok(v) => criteria.min_price = Some(v),
            Err(_) => println!("Usage: filter min <min>"),
        },
        ["duration", mins] => match mins.parse::<u32>() {
            Ok(v) => criteria.max_duration_minutes = Some(v),
            Err(_) => println!("Usage: filter duration <minutes>"),
        },
        ["stops", option] => match option.parse::<MaxStops>() {
            Ok(v) => criteria.max_stops = v,
            Err(e) => print_error(e),
        },
        ["airline"] => criteria.allowed_airlines.clear(),
        ["airline", names @ ..] => {
            criteria.allowed_airlines = names.join(" ").split(',').map(|n| n.trim().into()).collect();
        }
        ["depart", rest @ ..] => match parse_window(rest.first(), rest.get(1)) {
            Some(w) => criteria.time_window = w,
            None => println!("Usage: filter depart <from-hour> <to-hour> | any"),
        },
        ["arrive", rest @ ..] => match parse_window(rest.first(), rest.get(1)) {
            Some(w) => criteria.arrival_window = w,
            None => println!("Usage: filter arrive <from-hour> <to-hour> | any"),
        },
        ["reset"] => session.reset_filters(),
        [] => {}
        _ => println!("Unknown filter. Type 'help' for the list."),
    }
    println!("Filters: {}", session.criteria);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let scenario = Scenario::load_from_file(&args.scenario)?;
    println!(
        "Loaded {} offers and {} watched flights from {}",
        scenario.offers.len(),
        scenario.watchlist.len(),
        args.scenario.display()
    );

    let watchlist = scenario.watchlist;
    let mut session = Session::new(scenario.offers, scenario.ranking);

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["ls", "filter", "sort", "compare", "watch", "reset", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl: Editor<CompleteHelper, DefaultHistory> = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => match session.view() {
                        Ok(offers) if offers.is_empty() => println!("No matching flights found."),
                        Ok(offers) => {
                            println!("{} flights found, sorted by {}", offers.len(), session.sort_key);
                            print_table(offers.iter().map(OfferRow::from).collect());
                        }
                        Err(e) => print_error(e),
                    },
                    "filter" => apply_filter(&mut session, &parts[1..]),
                    "sort" => match parts.get(1).map(|k| k.parse::<SortKey>()) {
                        Some(Ok(key)) => {
                            session.sort_key = key;
                            println!("Sorting by {}.", key);
                        }
                        Some(Err(e)) => print_error(e),
                        None => println!("Usage: sort <best|price|duration|departure>"),
                    },
                    "compare" => match parts.get(1) {
                        Some(&"clear") => {
                            session.compare.clear();
                            println!("Compare list cleared.");
                        }
                        Some(id) => match session.toggle_compare(id) {
                            Ok(true) => println!("Comparing {}/3.", session.compare.len()),
                            Ok(false) => println!("Compare list is full. Remove a flight first."),
                            Err(e) => print_error(e),
                        },
                        None if session.compare.is_empty() => println!("Select up to 3 flights to compare."),
                        None => print_table(session.compared().into_iter().map(OfferRow::from).collect()),
                    },
                    "watch" => match summarize(&watchlist) {
                        Ok(summary) => {
                            print_table(watchlist.iter().map(WatchRow::from).collect());
                            println!("{}", summary);
                        }
                        Err(e) => print_error(e),
                    },
                    "reset" => {
                        session.reset();
                        println!("Session reset.");
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls                      - List matching flights with the current filters and sort");
                        println!("  filter price <max>      - Upper price bound (also: min <min>, duration <minutes>)");
                        println!("  filter stops <opt>      - any, nonstop or 1-stop");
                        println!("  filter airline <a,b>    - Restrict to airlines (no names clears)");
                        println!("  filter depart <h> <h>   - Departure hour window, or 'any' (also: arrive)");
                        println!("  filter reset            - Clear all filters");
                        println!("  sort <key>              - best, price, duration or departure");
                        println!("  compare [<id>|clear]    - Toggle a flight in the compare list, or show it");
                        println!("  watch                   - Show the watchlist and its summary");
                        println!("  reset                   - Reset filters, sort and compare list");
                        println!("  help / ?                - Show this help menu");
                        println!("  exit / quit             - Exit\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
