//! MindCoach CLI - sign in to the MindCoach backend from the terminal.
//!
//! Keeps the session (token plus profile) on disk between runs, so a
//! login survives until `mindcoach logout` or until the server rejects
//! the token.

mod prompt;

use std::io;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mindcoach_core::{AuthApi, Config, FileStore, KeyValueStore, ProfileUpdate, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "mindcoach", about = "MindCoach session client", version)]
struct Cli {
    /// Override the API base URL (otherwise MINDCOACH_API_BASE_URL, the
    /// config file, or the built-in default)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Create an account and log into it
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session without contacting the server
    Status,
    /// Fetch the current profile from the server
    Whoami,
    /// Update study-plan fields of the profile
    Profile {
        /// Exam date as YYYY-MM-DD
        #[arg(long)]
        exam_date: Option<String>,
        /// Comma-separated subject list
        #[arg(long)]
        subjects: Option<String>,
        #[arg(long)]
        companion_style: Option<String>,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let mut settings = config.api_settings();
    if let Some(ref url) = cli.api_url {
        settings = settings.with_base_url(url);
    }

    let storage = FileStore::open(config.storage_path()?)?;
    let api = AuthApi::new(&settings)?;
    let mut store = SessionStore::new(api, storage);
    info!(base_url = %store.api().base_url(), "Using API");

    match cli.command {
        Command::Login { email } => {
            let email = match email {
                Some(e) => e,
                None => prompt::prompt_line("Email", config.last_email.as_deref())?,
            };
            let password = prompt::prompt_password()?;

            if !store.login(&email, &password).await {
                bail!("Login failed. Check your email and password and try again.");
            }
            remember_email(&mut config, email);
            print_status(&store);
        }
        Command::Register { email, username } => {
            let email = match email {
                Some(e) => e,
                None => prompt::prompt_line("Email", None)?,
            };
            let username = match username {
                Some(u) => u,
                None => prompt::prompt_line("Username", None)?,
            };
            let password = prompt::prompt_password()?;

            let outcome = store.register(&email, &password, &username).await;
            if !outcome.success {
                bail!(
                    "{}",
                    outcome
                        .message
                        .unwrap_or_else(|| "Registration failed".to_string())
                );
            }
            remember_email(&mut config, email);
            println!("Registered and logged in.");
            print_status(&store);
        }
        Command::Logout => {
            store.logout();
            println!("Logged out.");
        }
        Command::Status => print_status(&store),
        Command::Whoami => {
            let user = store.refresh_user().await?;
            println!("{}", serde_json::to_string_pretty(user)?);
        }
        Command::Profile {
            exam_date,
            subjects,
            companion_style,
        } => {
            let update = ProfileUpdate {
                exam_date: exam_date.as_deref().map(prompt::parse_exam_date).transpose()?,
                selected_subjects: subjects.as_deref().map(prompt::parse_subjects),
                ai_companion_style: companion_style,
            };
            if update.is_empty() {
                bail!("Nothing to update; pass --exam-date, --subjects or --companion-style");
            }
            let user = store.update_profile(&update).await?;
            println!("{}", serde_json::to_string_pretty(user)?);
        }
    }

    Ok(())
}

fn remember_email(config: &mut Config, email: String) {
    config.last_email = Some(email);
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }
}

fn print_status<S: KeyValueStore>(store: &SessionStore<S>) {
    if !store.is_authenticated() {
        println!("Not logged in.");
        return;
    }

    match store.user() {
        Some(user) => {
            println!("Logged in as {}", user.display_summary());
            if !user.selected_subjects.is_empty() {
                println!("Subjects: {}", user.selected_subjects.join(", "));
            }
            if let Some(days) = user.days_until_exam(chrono::Utc::now()) {
                println!("Exam in {} days", days);
            }
        }
        None => println!("Logged in (no profile cached; run `mindcoach whoami`)."),
    }
}
