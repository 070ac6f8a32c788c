use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use handcards_core::{CardStatus, Flashcard, GestureDisposition, ReviewSession};
use services::popup::{self, PopupView};
use services::{AppServices, Clock, GestureLoop, LandmarkScript};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingScript,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingScript => write!(f, "replay requires --script <file>"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Add,
    List,
    Review,
    Replay,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "add" => Some(Self::Add),
            "list" => Some(Self::List),
            "review" => Some(Self::Review),
            "replay" => Some(Self::Replay),
            _ => None,
        }
    }
}

struct Args {
    store: PathBuf,
    front: Option<String>,
    back: Option<String>,
    script: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- add    [--front <text>] [--back <text>]");
    eprintln!("  cargo run -p app -- list");
    eprintln!("  cargo run -p app -- review");
    eprintln!("  cargo run -p app -- replay --script <file>");
    eprintln!();
    eprintln!("Every command also accepts --store <path>.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --store handcards.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  HANDCARDS_STORE, RUST_LOG");
}

impl Args {
    fn base() -> Self {
        let store = std::env::var("HANDCARDS_STORE")
            .ok()
            .map_or_else(|| PathBuf::from("handcards.json"), PathBuf::from);
        Self {
            store,
            front: None,
            back: None,
            script: None,
        }
    }

    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::base();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => parsed.store = PathBuf::from(require_value(args, "--store")?),
                "--front" if cmd == Command::Add => {
                    parsed.front = Some(require_value(args, "--front")?);
                }
                "--back" if cmd == Command::Add => {
                    parsed.back = Some(require_value(args, "--back")?);
                }
                "--script" if cmd == Command::Replay => {
                    parsed.script = Some(PathBuf::from(require_value(args, "--script")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Replay && parsed.script.is_none() {
            return Err(ArgsError::MissingScript);
        }

        Ok(parsed)
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_card(index: usize, card: &Flashcard) {
    println!("{:>3}. [{}] {} | {}", index + 1, card.status, card.front, card.back);
}

async fn run_add(services: &AppServices, args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let front = match args.front {
        Some(text) => text,
        None => prompt("Front: ")?,
    };
    let back = match args.back {
        Some(text) => text,
        None => prompt("Back: ")?,
    };

    let card = services.capture().save_card(&front, &back).await?;
    println!("saved card {} [{}]", card.id, card.status);
    Ok(())
}

async fn run_list(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let cards = match services.cards().load_all().await {
        Ok(cards) => cards,
        Err(e) => {
            log::error!("loading cards failed: {e}");
            println!("{}", popup::LOAD_ERROR_PLACEHOLDER);
            return Err(e.into());
        }
    };

    if cards.is_empty() {
        println!("{}", popup::NO_CARDS_PLACEHOLDER);
        return Ok(());
    }
    for (index, card) in cards.iter().enumerate() {
        print_card(index, card);
    }
    Ok(())
}

fn render(session: &ReviewSession) {
    let Some(view) = PopupView::from_session(session) else {
        println!("{}", popup::NO_CARDS_PLACEHOLDER);
        return;
    };

    println!();
    println!("({}) [{}] {}", view.position, view.status, view.front);
    match view.back {
        Some(back) => println!("    {back}"),
        None => println!("    (press Enter to reveal)"),
    }
}

// Keyboard marks drive the same session mutations the gesture path does,
// and are just as unpersisted.
fn mark(session: &mut ReviewSession, status: CardStatus) {
    let Some(id) = session.mark_current(status) else {
        return;
    };
    println!("marked card {id} [{status}]");
    session.next();
}

async fn run_review(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = match services.start_review().await {
        Ok(session) => session,
        Err(e) => {
            log::error!("loading cards failed: {e}");
            println!("{}", popup::LOAD_ERROR_PLACEHOLDER);
            return Err(e.into());
        }
    };
    if session.is_empty() {
        println!("{}", popup::NO_CARDS_PLACEHOLDER);
        return Ok(());
    }

    println!("Enter reveals the back, n/p move, e marks easy, w marks wrong, q quits.");
    let stdin = io::stdin();
    loop {
        render(&session);

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "" => session.reveal_back(),
            "n" => session.next(),
            "p" => session.prev(),
            "e" => mark(&mut session, CardStatus::Easy),
            "w" => mark(&mut session, CardStatus::Wrong),
            "q" => break,
            other => println!("unrecognized input: {other}"),
        }
    }
    Ok(())
}

async fn run_replay(services: &AppServices, args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = args.script else {
        return Err(ArgsError::MissingScript.into());
    };

    let script = LandmarkScript::parse(&std::fs::read_to_string(&path)?)?;
    let mut session = services.start_review().await?;

    let started = services.clock().now();
    let (mut frames, detector) = script.into_replay(started);
    let gestures = GestureLoop::new(Arc::new(detector));
    let outcomes = gestures.run(&mut session, &mut frames).await;

    for outcome in &outcomes {
        let millis = (outcome.frame.captured_at - started).num_milliseconds();
        let line = match (&outcome.disposition, outcome.gesture) {
            (Some(GestureDisposition::Applied(applied)), _) => popup::gesture_caption(applied),
            (Some(GestureDisposition::CoolingDown), Some(gesture)) => {
                format!("{gesture} ignored while the cooldown is active")
            }
            (Some(GestureDisposition::NoCards), Some(gesture)) => {
                format!("{gesture} found no cards to review")
            }
            _ => "no gesture".to_string(),
        };
        println!("{millis:>6} ms  {line}");
    }

    println!();
    println!("session after replay (marks stay in memory):");
    for (index, card) in session.cards().iter().enumerate() {
        print_card(index, card);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None | Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let mut iter = argv.into_iter().skip(1);
    let args = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let services = AppServices::json_file(&args.store, Clock::default_clock());

    match cmd {
        Command::Add => run_add(&services, args).await,
        Command::List => run_list(&services).await,
        Command::Review => run_review(&services).await,
        Command::Replay => run_replay(&services, args).await,
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
