use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::model::TestId;
use services::{
    AuthContext, BackendConfig, Clock, HttpExamBackend, PracticeService, ReviewService,
    SessionContext,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTestId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTestId { raw } => write!(f, "invalid --test-id value: {raw}"),
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
    initial_test_id: Option<TestId>,
    practice: Arc<PracticeService>,
    review: Arc<ReviewService>,
}

impl UiApp for DesktopApp {
    fn initial_test_id(&self) -> Option<TestId> {
        self.initial_test_id
    }

    fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    fn review(&self) -> Arc<ReviewService> {
        Arc::clone(&self.review)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    api_url: Option<String>,
    token: Option<String>,
    test_id: Option<TestId>,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--token <bearer>] [--test-id <id>]");
    eprintln!();
    eprintln!("Environment (a .env file is read if present):");
    eprintln!("  EXAM_API_BASE_URL      required unless --api-url is given (the flag wins)");
    eprintln!("  EXAM_API_TOKEN         bearer token");
    eprintln!("  EXAM_API_TIMEOUT_SECS  request timeout, default 100");
    eprintln!("  EXAM_API_VIEW_PATH     default buyer-tests/{{test_id}}/view-model");
    eprintln!("  EXAM_API_REVIEW_PATH   default buyer-tests/{{test_id}}");
    eprintln!("  EXAM_TEST_ID           test to prefill on launch");
    eprintln!("  RUST_LOG               log filter, default info");
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            test_id: std::env::var("EXAM_TEST_ID")
                .ok()
                .and_then(|value| value.parse::<TestId>().ok()),
            ..Self::default()
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => parsed.api_url = Some(require_value(&mut args, "--api-url")?),
                "--token" => parsed.token = Some(require_value(&mut args, "--token")?),
                "--test-id" => {
                    let value = require_value(&mut args, "--test-id")?;
                    let id = value
                        .parse::<TestId>()
                        .map_err(|_| ArgsError::InvalidTestId { raw: value.clone() })?;
                    parsed.test_id = Some(id);
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).inspect_err(|_| print_usage())?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let config = match args.api_url.as_deref() {
        Some(url) => BackendConfig::from_env_with_base(url)?,
        None => BackendConfig::from_env()?,
    };
    let auth = args
        .token
        .map_or_else(AuthContext::anonymous, AuthContext::with_token);
    info!(base_url = %config.base_url, authenticated = auth.is_authenticated() || config.token.is_some(), "starting");

    let backend = Arc::new(HttpExamBackend::new(config, &auth)?);
    let context = SessionContext::new(auth);
    let practice = Arc::new(PracticeService::new(
        backend.clone(),
        Clock::system(),
        context.clone(),
    ));
    let review = Arc::new(ReviewService::new(backend, context));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        initial_test_id: args.test_id,
        practice,
        review,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Exam Practice")
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
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
