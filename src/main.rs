use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use casekit::client::SessionClient;
use casekit::commands;
use casekit::commands::storage::StorageProfile;
use casekit::models::{CaseRecord, RequestRecord};

#[derive(Parser)]
#[command(name = "casekit")]
#[command(about = "Seed and smoke-test a case-management web application")]
#[command(version)]
struct Cli {
    /// Base URL of the application
    #[arg(long, global = true, env = "CASEKIT_BASE_URL", default_value = "http://localhost:5000")]
    base_url: String,

    /// Login email
    #[arg(long, global = true, env = "CASEKIT_EMAIL", default_value = "manager@example.com")]
    email: String,

    /// Login password
    #[arg(long, global = true, env = "CASEKIT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and report whether the session was established
    Login,

    /// Create a case through the web form
    CreateCase {
        #[command(flatten)]
        case: CaseArgs,
    },

    /// Create a case through the JSON API
    CreateCaseApi {
        #[command(flatten)]
        case: CaseArgs,
    },

    /// Attach a request to an existing case
    CreateRequest {
        /// Case ID as shown by the application
        case_id: String,
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Create every case in a JSON file with one request
    BulkCreate {
        /// File holding a JSON array of cases
        file: PathBuf,
    },

    /// Check that the active case listing is reachable
    Active,

    /// Run the full demonstration sequence
    Seed,

    /// Rewrite the application's settings file to use local SQLite stores
    PinStorage {
        /// Settings file to overwrite
        #[arg(long, default_value = "config.py")]
        path: PathBuf,
        /// Which settings module to write
        #[arg(long, value_enum, default_value = "file-databases")]
        profile: StorageProfile,
    },
}

#[derive(Args)]
struct CaseArgs {
    /// Issue type (Technical, Billing, Service, ...)
    #[arg(long)]
    issue_type: Option<String>,
    /// Case status
    #[arg(long)]
    status: Option<String>,
    /// Maker username
    #[arg(long)]
    maker: Option<String>,
    /// Checker username
    #[arg(long)]
    checker: Option<String>,
    /// Maker comments
    #[arg(long)]
    maker_comments: Option<String>,
    /// Checker comments
    #[arg(long)]
    checker_comments: Option<String>,
    /// Priority (Low, Medium, High)
    #[arg(short, long)]
    priority: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due_date: Option<NaiveDate>,
}

impl From<CaseArgs> for CaseRecord {
    fn from(args: CaseArgs) -> Self {
        CaseRecord {
            issue_type: args.issue_type,
            case_status: args.status,
            maker: args.maker,
            checker: args.checker,
            maker_comments: args.maker_comments,
            checker_comments: args.checker_comments,
            priority: args.priority,
            due_date: args.due_date,
            ..Default::default()
        }
    }
}

#[derive(Args)]
struct RequestArgs {
    /// Request type (Information, Approval, ...)
    #[arg(long)]
    request_type: Option<String>,
    /// What is being asked for
    #[arg(short, long)]
    description: Option<String>,
    /// Request status
    #[arg(long)]
    status: Option<String>,
    /// Priority (Low, Medium, High)
    #[arg(short, long)]
    priority: Option<String>,
    /// Team or user the request is assigned to
    #[arg(long)]
    assigned_to: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due_date: Option<NaiveDate>,
    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,
}

impl From<RequestArgs> for RequestRecord {
    fn from(args: RequestArgs) -> Self {
        RequestRecord {
            request_type: args.request_type,
            request_description: args.description,
            status: args.status,
            priority: args.priority,
            assigned_to: args.assigned_to,
            due_date: args.due_date,
            notes: args.notes,
            ..Default::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "casekit=debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or(default_level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn require_password(password: Option<&str>) -> Result<&str> {
    match password {
        Some(p) => Ok(p),
        None => bail!("No password given. Pass --password or set CASEKIT_PASSWORD."),
    }
}

fn session(base_url: &str, email: &str, password: Option<&str>) -> Result<SessionClient> {
    commands::login::connect(base_url, email, require_password(password)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (base_url, email, password) = (&cli.base_url, &cli.email, cli.password.as_deref());

    match cli.command {
        Commands::Login => commands::login::run(base_url, email, require_password(password)?),

        Commands::CreateCase { case } => {
            let client = session(base_url, email, password)?;
            commands::cases::create(&client, &case.into())
        }

        Commands::CreateCaseApi { case } => {
            let client = session(base_url, email, password)?;
            commands::cases::create_via_api(&client, &case.into())?;
            Ok(())
        }

        Commands::CreateRequest { case_id, request } => {
            let client = session(base_url, email, password)?;
            commands::cases::create_request(&client, &case_id, &request.into())
        }

        Commands::BulkCreate { file } => {
            let cases = commands::cases::load_cases(&file)?;
            let client = session(base_url, email, password)?;
            commands::cases::bulk_create(&client, &cases)?;
            Ok(())
        }

        Commands::Active => {
            let client = session(base_url, email, password)?;
            commands::cases::active(&client)
        }

        Commands::Seed => {
            let client = session(base_url, email, password)?;
            commands::seed::run(&client, Local::now().date_naive());
            Ok(())
        }

        Commands::PinStorage { path, profile } => commands::storage::run(&path, profile),
    }
}
