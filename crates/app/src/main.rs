use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuizType;
use services::{
    ApiConfig, Clock, HttpQuizApi, InMemoryQuizApi, QuizApi, QuizLoopService, SessionConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

mod demo;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidQuizType { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidQuizType { raw } => {
                write!(f, "invalid --type value: {raw} (expected timed or mock)")
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

struct DesktopApp {
    quiz_type: QuizType,
    resume: bool,
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_type(&self) -> QuizType {
        self.quiz_type
    }

    fn resume_on_launch(&self) -> bool {
        self.resume
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Debug, Default)]
struct Args {
    api_url: Option<String>,
    token: Option<String>,
    quiz_type: QuizType,
    offline: bool,
    resume: bool,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <url>] [--token <token>] [--type timed|mock] [--resume]");
    eprintln!("  cargo run -p app -- --offline [--type timed|mock]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {}", services::config::DEFAULT_API_URL);
    eprintln!("  --type timed");
    eprintln!();
    eprintln!("Environment (a .env file is read if present):");
    eprintln!("  ZONATA_API_URL, ZONATA_API_TOKEN, ZONATA_HTTP_TIMEOUT_SECS,");
    eprintln!("  ZONATA_FEEDBACK_DWELL_MS, ZONATA_QUIZ_TYPE, RUST_LOG");
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        if let Ok(raw) = std::env::var("ZONATA_QUIZ_TYPE") {
            parsed.quiz_type = raw
                .parse()
                .map_err(|_| ArgsError::InvalidQuizType { raw })?;
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => parsed.api_url = Some(require_value(&mut args, "--api")?),
                "--token" => parsed.token = Some(require_value(&mut args, "--token")?),
                "--type" => {
                    let value = require_value(&mut args, "--type")?;
                    parsed.quiz_type = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidQuizType { raw: value.clone() })?;
                }
                "--offline" => parsed.offline = true,
                "--resume" => parsed.resume = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }
}

/// Install the global subscriber. Logs go to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_api(args: &Args) -> Result<Arc<dyn QuizApi>, Box<dyn std::error::Error>> {
    if args.offline {
        info!("using the built-in offline question bank");
        let api = InMemoryQuizApi::new(demo::demo_bank(), demo::DEMO_TIME_LIMIT_SECS)
            .with_shuffle(true);
        return Ok(Arc::new(api));
    }

    let mut config = ApiConfig::from_env()?;
    if let Some(url) = &args.api_url {
        config = ApiConfig::new(url)?
            .with_token(config.token.take())
            .with_timeout(config.timeout);
    }
    if args.token.is_some() {
        config = config.with_token(args.token.clone());
    }
    info!(base_url = %config.base_url, "using quiz api");
    Ok(Arc::new(HttpQuizApi::new(config)?))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let api = build_api(&args)?;
    let session_config = SessionConfig::from_env()?;
    let quiz_loop = QuizLoopService::new(Clock::system(), api).with_config(session_config);

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_type: args.quiz_type,
        resume: args.resume,
        quiz_loop: Arc::new(quiz_loop),
    });
    let context = build_app_context(&app);
    info!(quiz_type = %args.quiz_type, resume = args.resume, "launching quiz window");

    // Some dev setups default the window to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Zonata Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
