//! `linkedin-session`: check, start and end a LinkedIn sign-in from the terminal.

use clap::{Parser, Subcommand};
use linkedin_signin_session_client::{SessionClient, ViewState, render};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Session client for the linkedin-signin gateway
#[derive(Parser, Debug, Clone)]
#[command(name = "linkedin-session")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the gateway
    #[arg(long, env = "LINKEDIN_SESSION_BACKEND", default_value = "http://localhost:3001")]
    backend: String,

    /// Cookie header to send, as copied from the browser (e.g. "li_profile=...")
    #[arg(long, env = "LINKEDIN_SESSION_COOKIE")]
    cookie: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Show who is signed in
    Whoami,
    /// Print the URL that starts a sign-in
    LoginUrl,
    /// Sign out
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let client = match SessionClient::new(&cli.backend) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut client = match cli.cookie {
        Some(cookie) => client.with_cookie(cookie),
        None => client,
    };

    match cli.command {
        Command::Whoami => {
            let login_url = client.login_url();
            let state = client.load().await;
            println!("{}", render(state));
            match state {
                ViewState::Error(_) => ExitCode::FAILURE,
                ViewState::Authed(_) => ExitCode::SUCCESS,
                ViewState::Idle | ViewState::Loading => {
                    println!("Sign in at {login_url}");
                    ExitCode::SUCCESS
                }
            }
        }
        Command::LoginUrl => {
            println!("{}", client.login_url());
            ExitCode::SUCCESS
        }
        Command::Logout => match client.logout().await {
            Ok(()) => {
                println!("{}", render(client.state()));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands_and_options() {
        let cli = Cli::try_parse_from([
            "linkedin-session",
            "--backend",
            "http://gateway:3001",
            "--cookie",
            "li_profile=abc",
            "whoami",
        ])
        .expect("parse");

        assert_eq!(cli.backend, "http://gateway:3001");
        assert_eq!(cli.cookie.as_deref(), Some("li_profile=abc"));
        assert_eq!(cli.command, Command::Whoami);

        let cli = Cli::try_parse_from(["linkedin-session", "login-url"]).expect("parse");
        assert_eq!(cli.command, Command::LoginUrl);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["linkedin-session"]).is_err());
    }
}
