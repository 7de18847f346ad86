//! Console stand-in for the landing, login and signup screens.
//!
//! One request per input line, one JSON outcome per output line.

use crate::directory::{
    default_seed, load_seed_file, AccountDirectory, DirectoryConfig, Outcome, SeedAccount,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, instrument};

pub const HELP: &str = "Commands: signup <username> <email> <password> | login <email> <password> | help | quit";
pub const MSG_UNKNOWN_COMMAND: &str = "Unknown command, type 'help'.";
pub const MSG_SIGNUP_USAGE: &str = "Usage: signup <username> <email> <password>";
pub const MSG_LOGIN_USAGE: &str = "Usage: login <email> <password>";

#[derive(Debug)]
pub struct Args {
    pub min_password_length: usize,
    pub latency_ms: u64,
    pub seed: Option<PathBuf>,
    pub default_seed: bool,
}

impl Args {
    fn config(&self) -> DirectoryConfig {
        DirectoryConfig::new()
            .with_min_password_length(self.min_password_length)
            .with_latency(Duration::from_millis(self.latency_ms))
    }

    fn seeds(&self) -> Result<Vec<SeedAccount>> {
        let mut seeds = if self.default_seed {
            default_seed()
        } else {
            Vec::new()
        };

        if let Some(path) = &self.seed {
            seeds.extend(load_seed_file(path)?);
        }

        Ok(seeds)
    }
}

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Request {
    Signup {
        username: String,
        email: String,
        password: String,
    },
    Login {
        email: String,
        password: String,
    },
    Help,
    Quit,
    Empty,
    Invalid(&'static str),
}

#[must_use]
pub fn parse_line(line: &str) -> Request {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        [] => Request::Empty,
        ["signup", username, email, password] => Request::Signup {
            username: (*username).to_string(),
            email: (*email).to_string(),
            password: (*password).to_string(),
        },
        ["signup", ..] => Request::Invalid(MSG_SIGNUP_USAGE),
        ["login", email, password] => Request::Login {
            email: (*email).to_string(),
            password: (*password).to_string(),
        },
        ["login", ..] => Request::Invalid(MSG_LOGIN_USAGE),
        ["help"] => Request::Help,
        ["quit" | "exit"] => Request::Quit,
        _ => Request::Invalid(MSG_UNKNOWN_COMMAND),
    }
}

/// Serve requests from `input` until `quit` or end of input.
///
/// # Errors
/// Returns an error if reading input or writing output fails.
pub async fn run<R, W>(directory: &AccountDirectory, mut input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();

        let read = input
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read input")?;

        if read == 0 {
            break;
        }

        // a garbled line is answered, it does not end the session
        let Ok(line) = std::str::from_utf8(&buf) else {
            debug!("Input line is not valid UTF-8");
            write_outcome(output, &Outcome::failure(MSG_UNKNOWN_COMMAND)).await?;
            continue;
        };

        let outcome = match parse_line(line) {
            Request::Empty => continue,
            Request::Quit => break,
            Request::Help => Outcome {
                success: true,
                message: HELP.to_string(),
                user: None,
            },
            Request::Invalid(message) => Outcome::failure(message),
            Request::Signup {
                username,
                email,
                password,
            } => {
                let password = SecretString::from(password);
                directory.register_outcome(&username, &email, &password).await
            }
            Request::Login { email, password } => {
                let password = SecretString::from(password);
                directory.authenticate_outcome(&email, &password).await
            }
        };

        write_outcome(output, &outcome).await?;
    }

    debug!("Session finished");

    Ok(())
}

async fn write_outcome<W: AsyncWrite + Unpin>(output: &mut W, outcome: &Outcome) -> Result<()> {
    let mut rendered = serde_json::to_string(outcome)?;
    rendered.push('\n');

    output
        .write_all(rendered.as_bytes())
        .await
        .context("Failed to write output")?;
    output.flush().await?;

    Ok(())
}

/// Execute the session action on stdin/stdout.
/// # Errors
/// Returns an error if the seed accounts are rejected or the console fails.
#[instrument]
pub async fn execute(args: Args) -> Result<()> {
    let directory = AccountDirectory::with_seed(args.config(), &args.seeds()?)
        .await
        .context("Failed to seed the account directory")?;

    info!(
        "Talkie Town directory ready with {} accounts",
        directory.len().await
    );

    let stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();

    run(&directory, stdin, &mut stdout).await
}
