//! # Talkie Town account directory
//!
//! `talkie` holds the accounts of the Talkie Town chat prototype and answers
//! its signup and login forms.
//!
//! ## Accounts
//!
//! - **Unique email:** an email identifies exactly one account; comparison is
//!   an exact, case-sensitive match.
//! - **No plain text:** passwords are hashed with Argon2id and a random salt
//!   before they are stored. Only `{ username, email }` ever leaves the
//!   directory.
//! - **Volatile:** the directory lives in memory and starts from its seed
//!   accounts on every run.
//!
//! ## Front end
//!
//! The `talkie` binary runs a line-oriented console session that stands in for
//! the landing, login and signup screens. Every request is answered with one
//! JSON line shaped like `{"success":true,"message":"...","user":{...}}`.

pub mod cli;
pub mod directory;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
