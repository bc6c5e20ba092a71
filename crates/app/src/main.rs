use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuizSettings;
use services::{Clock, QuizService};
use storage::{DEFAULT_CONFIG_FILE, load_settings};
use tracing::{info, warn};
use ui::{App, UiApp, build_app_context};

mod logging;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyPath { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyPath { flag } => write!(f, "{flag} must not be empty"),
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

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = require_value(args, flag)?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyPath { flag });
    }
    Ok(PathBuf::from(value))
}

struct DesktopApp {
    quiz: QuizService,
}

impl UiApp for DesktopApp {
    fn quiz_service(&self) -> QuizService {
        self.quiz.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions <file>] [--dir <dir>] [--config <file>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --dir     current directory (searched for a question file)");
    eprintln!("  --config  {DEFAULT_CONFIG_FILE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE, QUIZ_DIR, QUIZ_CONFIG, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    questions: Option<PathBuf>,
    dir: Option<PathBuf>,
    config: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Args),
    Help,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, ArgsError> {
        let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());
        let mut questions = non_empty("QUIZ_FILE").map(PathBuf::from);
        let mut dir = non_empty("QUIZ_DIR").map(PathBuf::from);
        let mut config = non_empty("QUIZ_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => questions = Some(require_path(args, "--questions")?),
                "--dir" => dir = Some(require_path(args, "--dir")?),
                "--config" => config = require_path(args, "--config")?,
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Run(Self {
            questions,
            dir,
            config,
        }))
    }
}

fn resolve_settings(args: &Args) -> QuizSettings {
    match load_settings(&args.config) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(error = %err, "falling back to default settings");
            QuizSettings::default()
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Command::Run(args) => args,
        Command::Help => {
            print_usage();
            return Ok(());
        }
    };

    let settings = resolve_settings(&args);
    let search_dir = args.dir.clone().or_else(|| std::env::current_dir().ok());
    let quiz = QuizService::bootstrap(
        settings,
        Clock::system(),
        args.questions.as_deref(),
        search_dir.as_deref(),
    );
    info!(bank = %quiz.bank_label(), "starting quiz window");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    logging::init_logging();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
