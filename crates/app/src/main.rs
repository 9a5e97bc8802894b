use std::fmt;
use std::io::{self, BufRead, Write};

use quiz_core::SessionEvent;
use quiz_core::model::Phase;
use services::settings::{DEFAULT_SESSION_KEY, AssessmentSettings};
use services::{AssessmentLoopService, AssessmentSession, AssessmentView, Clock, MEMORY_DB, open_storage};

mod input;
mod render;

use input::{Command, parse_command};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidSeed { raw: String },
    InvalidSessionKey { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidSessionKey { raw } => {
                write!(f, "invalid --session-key value: {raw:?}")
            }
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  finquiz [--db <sqlite_url|memory>] [--session-key <key>] [--seed <u64>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:finquiz.sqlite3");
    eprintln!("  --session-key {DEFAULT_SESSION_KEY}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FINQUIZ_DB_URL, FINQUIZ_SESSION_KEY, RUST_LOG");
}

#[derive(Debug)]
struct Args {
    db_url: String,
    session_key: String,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("FINQUIZ_DB_URL")
            .ok()
            .map_or_else(|| normalize_db_url("sqlite:finquiz.sqlite3".into()), normalize_db_url);
        let mut session_key = std::env::var("FINQUIZ_SESSION_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_KEY.to_owned());
        let mut seed = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_db_url(value);
                }
                "--session-key" => {
                    let value = require_value(args, "--session-key")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidSessionKey { raw: value });
                    }
                    session_key = value;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            session_key,
            seed,
        })
    }
}

fn normalize_db_url(raw: String) -> String {
    let trimmed = raw.trim().to_string();
    if trimmed == MEMORY_DB || trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed;
    }

    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == MEMORY_DB || db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Event for `n`: start from the intro, advance everywhere else.
fn next_event(view: &AssessmentView) -> SessionEvent {
    if view.phase == Phase::Intro {
        SessionEvent::Start
    } else {
        SessionEvent::Advance
    }
}

/// Hand pending results to the store after the results screen is on screen.
async fn finish_submission(service: &AssessmentLoopService, session: &mut AssessmentSession) {
    if let Some(status) = service.complete_submission(session).await {
        println!("{}", status.label());
    }
}

async fn run_loop(
    service: &AssessmentLoopService,
    session: &mut AssessmentSession,
) -> Result<(), Box<dyn std::error::Error>> {
    // Resuming mid-session re-serves the screen as it was.
    let mut view = if session.state().phase() == Phase::Intro {
        service.view(session)
    } else {
        service.dispatch(session, SessionEvent::Start).await?.view
    };
    if session.was_resumed() {
        println!("Welcome back, picking up where you left off.");
    }
    println!("{}", render::render(&view));
    finish_submission(service, session).await;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;

        let event = match parse_command(&line) {
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Help) => {
                println!("{}", render::help());
                continue;
            }
            Ok(Command::History) => {
                println!("{}", render::render_history(&service.history().await?));
                continue;
            }
            Ok(Command::Reset) => {
                view = service.reset(session).await?.view;
                println!("{}", render::render(&view));
                continue;
            }
            Ok(Command::Choose(choice)) => SessionEvent::Answer { choice },
            Ok(Command::Next) => next_event(&view),
            Ok(Command::Level(level)) => SessionEvent::ChangeSelfLevel(level),
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match service.dispatch(session, event).await {
            Ok(outcome) => {
                view = outcome.view;
                println!("{}", render::render(&view));
                finish_submission(service, session).await;
            }
            Err(err) => {
                log::debug!("rejected {event}: {err}");
                println!("{err}");
            }
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    log::debug!("starting with {parsed:?}");

    // Open + migrate storage at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = open_storage(&parsed.db_url).await?;

    let settings = AssessmentSettings::default().with_session_key(parsed.session_key);
    let service = AssessmentLoopService::from_storage(Clock::default(), &storage, settings)
        .with_seed(parsed.seed);

    let mut session = service.resume_or_start(&service.settings().session_key).await;
    run_loop(&service, &mut session).await
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
