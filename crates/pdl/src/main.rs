mod commands;
mod config;
mod error;

use clap::{Parser, Subcommand};
use commands::evaluations::{OutcomeArgs, SubmitArgs};
use error::CliError;
use pdl_api::{ApiClient, ApiError};
use pdl_core::types::EvaluationId;
use pdl_store::StateStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdl", about = "Client for the PDL training-feedback portal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Authenticate against the portal
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        company: Option<String>,
        /// Remember the email/company for 30 days
        #[arg(long)]
        remember: bool,
    },
    /// Drop the local session
    Logout,
    /// Show the current session and check the token
    Whoami,
    /// List companies
    Companies {
        #[arg(long)]
        query: Option<String>,
    },
    /// List this company's training programs
    Programs,
    /// Select a program by ID or name slug
    SelectProgram { selector: String },
    /// List evaluation records with status badges
    Evaluations {
        /// Your own records across programs instead of the selected program
        #[arg(long)]
        mine: bool,
    },
    /// Record learnings and commitments for a session
    Submit(SubmitArgs),
    /// Fill in or edit the outcome fields of a record
    Outcomes {
        id: EvaluationId,
        #[command(flatten)]
        args: OutcomeArgs,
    },
    /// Export an evaluation as a PDF report
    Report {
        id: EvaluationId,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

async fn run(cli: Cli, client: &ApiClient, store: &StateStore) -> Result<(), CliError> {
    match cli.command {
        Command::Login {
            email,
            password,
            company,
            remember,
        } => commands::auth::login(client, store, email, password, company, remember).await,
        Command::Logout => commands::auth::logout(store),
        Command::Whoami => commands::auth::whoami(client, store).await,
        Command::Companies { query } => commands::companies::list(client, query).await,
        Command::Programs => commands::programs::list(client, store).await,
        Command::SelectProgram { selector } => {
            commands::programs::select(client, store, selector).await
        }
        Command::Evaluations { mine } => commands::evaluations::list(client, store, mine).await,
        Command::Submit(args) => commands::evaluations::submit(client, store, args).await,
        Command::Outcomes { id, args } => {
            commands::evaluations::outcomes(client, store, id, args).await
        }
        Command::Report { id, out } => commands::report::export(client, store, id, out).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = match config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    let store = match StateStore::open(&config.state_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    let client = match ApiClient::new(config.base_url) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    match store.token() {
        Ok(Some(token)) => client.set_token(&token),
        Ok(None) => {}
        Err(err) => eprintln!("warning: could not read stored token: {err}"),
    }
    client.on_session_expired(Box::new(|| {
        tracing::warn!("authentication rejected, session will be cleared");
    }));

    if let Err(err) = run(cli, &client, &store).await {
        // The uniform 401 policy: clear local session state and point the
        // user back at login.
        if matches!(err, CliError::Api(ApiError::Unauthorized)) {
            let _ = store.clear_session();
            eprintln!("session expired: local session cleared, run `pdl login` to continue");
        } else {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }
}
