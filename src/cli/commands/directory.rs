use crate::directory::DEFAULT_MIN_PASSWORD_LENGTH;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

pub const ARG_MIN_PASSWORD_LENGTH: &str = "min-password-length";
pub const ARG_LATENCY_MS: &str = "latency-ms";
pub const ARG_SEED: &str = "seed";
pub const ARG_NO_DEFAULT_SEED: &str = "no-default-seed";

#[derive(Debug)]
pub struct Options {
    pub min_password_length: usize,
    pub latency_ms: u64,
    pub seed: Option<PathBuf>,
    pub default_seed: bool,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &clap::ArgMatches) -> Self {
        Self {
            min_password_length: matches
                .get_one::<usize>(ARG_MIN_PASSWORD_LENGTH)
                .copied()
                .unwrap_or(DEFAULT_MIN_PASSWORD_LENGTH),
            latency_ms: matches.get_one::<u64>(ARG_LATENCY_MS).copied().unwrap_or(0),
            seed: matches.get_one::<PathBuf>(ARG_SEED).cloned(),
            default_seed: !matches.get_flag(ARG_NO_DEFAULT_SEED),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_MIN_PASSWORD_LENGTH)
                .long(ARG_MIN_PASSWORD_LENGTH)
                .help("Minimum password length accepted at signup")
                .env("TALKIE_MIN_PASSWORD_LENGTH")
                .default_value(DEFAULT_MIN_PASSWORD_LENGTH.to_string())
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new(ARG_LATENCY_MS)
                .long(ARG_LATENCY_MS)
                .help("Artificial delay in milliseconds before each request is answered")
                .env("TALKIE_LATENCY_MS")
                .default_value("0")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_SEED)
                .short('s')
                .long(ARG_SEED)
                .help("JSON file with seed accounts: [{\"username\", \"email\", \"password\"}]")
                .env("TALKIE_SEED")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_NO_DEFAULT_SEED)
                .long(ARG_NO_DEFAULT_SEED)
                .help("Start without the built-in test@town.com account")
                .env("TALKIE_NO_DEFAULT_SEED")
                .action(ArgAction::SetTrue),
        )
}
