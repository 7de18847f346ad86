//! In-memory account directory.
//!
//! The directory is the only owner of the account list. Callers hold a cheap
//! clonable handle; every clone sees the same accounts.

mod account;
mod config;
mod error;
mod outcome;
mod password;

pub use self::account::{default_seed, load_seed_file, PublicAccount, SeedAccount};
pub use self::config::{DirectoryConfig, DEFAULT_MIN_PASSWORD_LENGTH};
pub use self::error::{DirectoryError, Result};
pub use self::outcome::Outcome;

use self::account::Account;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Which checks an insert runs besides email uniqueness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Policy {
    Signup,
    Seed,
}

#[derive(Clone, Debug)]
pub struct AccountDirectory {
    config: DirectoryConfig,
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl AccountDirectory {
    #[must_use]
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            config,
            accounts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Build a directory and insert `seeds` in order.
    ///
    /// Seeds keep email uniqueness but bypass the password length policy and
    /// the configured latency.
    ///
    /// # Errors
    /// Returns `DuplicateEmail` for the first seed that repeats an email.
    pub async fn with_seed(config: DirectoryConfig, seeds: &[SeedAccount]) -> Result<Self> {
        let directory = Self::new(config);

        for seed in seeds {
            directory
                .insert(&seed.username, &seed.email, &seed.password, Policy::Seed)
                .await
                .inspect_err(|e| warn!("Rejected seed account {}: {e}", seed.email))?;
        }

        debug!("Directory seeded with {} accounts", seeds.len());

        Ok(directory)
    }

    #[must_use]
    pub const fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    pub async fn contains_email(&self, email: &str) -> bool {
        self.accounts.read().await.iter().any(|a| a.email == email)
    }

    /// Sign up a new account.
    ///
    /// # Errors
    /// `DuplicateEmail` if the email is taken, otherwise `WeakPassword` if the
    /// password is shorter than the configured minimum.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<()> {
        self.simulate_latency().await;

        self.insert(username, email, password, Policy::Signup).await?;

        info!("Account registered");

        Ok(())
    }

    /// Check credentials and return the public view of the account.
    ///
    /// # Errors
    /// `AccountNotFound` if no account has this email, `InvalidCredentials` if
    /// the password does not match.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<PublicAccount> {
        self.simulate_latency().await;

        let account = {
            let accounts = self.accounts.read().await;
            accounts.iter().find(|a| a.email == email).cloned()
        };

        let Some(account) = account else {
            debug!("Account not found");
            return Err(DirectoryError::AccountNotFound);
        };

        if !password::verify(password, &account.password_hash).await? {
            debug!("Password mismatch");
            return Err(DirectoryError::InvalidCredentials);
        }

        debug!("Login successful");

        Ok(account.public())
    }

    async fn simulate_latency(&self) {
        let latency = self.config.latency();

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    async fn insert(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
        policy: Policy,
    ) -> Result<()> {
        // cheap rejection before paying for a hash
        if self.contains_email(email).await {
            debug!("Email already registered");
            return Err(DirectoryError::DuplicateEmail);
        }

        let weak = policy == Policy::Signup && self.config.is_weak(password.expose_secret());

        let password_hash = if weak {
            None
        } else {
            Some(password::hash(password).await?)
        };

        // the duplicate check and the push share one critical section
        let mut accounts = self.accounts.write().await;

        if accounts.iter().any(|a| a.email == email) {
            debug!("Email registered concurrently");
            return Err(DirectoryError::DuplicateEmail);
        }

        let Some(password_hash) = password_hash else {
            debug!("Password too short");
            return Err(DirectoryError::WeakPassword {
                min: self.config.min_password_length(),
            });
        };

        accounts.push(Account {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        });

        Ok(())
    }

    /// [`AccountDirectory::register`] rendered as the front end envelope.
    pub async fn register_outcome(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Outcome {
        Outcome::from_register(self.register(username, email, password).await)
    }

    /// [`AccountDirectory::authenticate`] rendered as the front end envelope.
    pub async fn authenticate_outcome(&self, email: &str, password: &SecretString) -> Outcome {
        Outcome::from_authenticate(self.authenticate(email, password).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value)
    }

    async fn ana_directory() -> Result<AccountDirectory> {
        let directory = AccountDirectory::new(DirectoryConfig::new());
        directory
            .register("Ana", "ana@x.com", &secret("secret1"))
            .await?;
        Ok(directory)
    }

    #[tokio::test]
    async fn register_then_authenticate_returns_username() -> Result<()> {
        let directory = ana_directory().await?;
        assert_eq!(directory.len().await, 1);

        let user = directory
            .authenticate("ana@x.com", &secret("secret1"))
            .await?;
        assert_eq!(
            user,
            PublicAccount {
                username: "Ana".to_string(),
                email: "ana@x.com".to_string(),
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_growth() -> Result<()> {
        let directory = ana_directory().await?;

        let result = directory
            .register("Bea", "ana@x.com", &secret("other12"))
            .await;
        assert_eq!(result, Err(DirectoryError::DuplicateEmail));
        assert_eq!(directory.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn weak_password_is_rejected_without_growth() -> Result<()> {
        let directory = ana_directory().await?;

        let result = directory.register("Cid", "cid@x.com", &secret("123")).await;
        assert_eq!(result, Err(DirectoryError::WeakPassword { min: 6 }));
        assert_eq!(directory.len().await, 1);
        assert!(!directory.contains_email("cid@x.com").await);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_wins_over_weak_password() -> Result<()> {
        let directory = ana_directory().await?;

        let result = directory.register("Bea", "ana@x.com", &secret("1")).await;
        assert_eq!(result, Err(DirectoryError::DuplicateEmail));
        Ok(())
    }

    #[tokio::test]
    async fn minimum_length_is_configurable() -> Result<()> {
        let directory = AccountDirectory::new(DirectoryConfig::new().with_min_password_length(8));

        let result = directory
            .register("Ana", "ana@x.com", &secret("secret1"))
            .await;
        assert_eq!(result, Err(DirectoryError::WeakPassword { min: 8 }));

        directory
            .register("Ana", "ana@x.com", &secret("secret12"))
            .await?;
        assert_eq!(directory.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() -> Result<()> {
        let directory = ana_directory().await?;

        let result = directory
            .authenticate("Ana@x.com", &secret("secret1"))
            .await;
        assert_eq!(result, Err(DirectoryError::AccountNotFound));

        directory
            .register("Ana2", "ANA@x.com", &secret("secret1"))
            .await?;
        assert_eq!(directory.len().await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn usernames_may_repeat() -> Result<()> {
        let directory = ana_directory().await?;
        directory
            .register("Ana", "ana@y.com", &secret("secret1"))
            .await?;
        assert_eq!(directory.len().await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn authenticate_failures() -> Result<()> {
        let directory = ana_directory().await?;

        assert_eq!(
            directory.authenticate("ana@x.com", &secret("wrong")).await,
            Err(DirectoryError::InvalidCredentials)
        );
        assert_eq!(
            directory.authenticate("missing@x.com", &secret("x")).await,
            Err(DirectoryError::AccountNotFound)
        );
        Ok(())
    }

    #[tokio::test]
    async fn repeated_logins_do_not_mutate() -> Result<()> {
        let directory = ana_directory().await?;

        for _ in 0..3 {
            directory
                .authenticate("ana@x.com", &secret("secret1"))
                .await?;
        }
        assert_eq!(directory.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn stored_record_has_no_plain_text_password() -> Result<()> {
        let directory = ana_directory().await?;

        let accounts = directory.accounts.read().await;
        assert_eq!(accounts.len(), 1);
        assert!(accounts[0].password_hash.starts_with("$argon2id$"));
        assert!(!accounts[0].password_hash.contains("secret1"));
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_one_store() -> Result<()> {
        let directory = AccountDirectory::new(DirectoryConfig::new());
        let handle = directory.clone();

        handle
            .register("Ana", "ana@x.com", &secret("secret1"))
            .await?;
        assert!(directory.contains_email("ana@x.com").await);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_keep_email_unique() -> Result<()> {
        let directory = AccountDirectory::new(DirectoryConfig::new());

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let directory = directory.clone();
                tokio::spawn(async move {
                    directory
                        .register(&format!("user{i}"), "same@x.com", &secret("secret1"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for task in tasks {
            match task.await {
                Ok(Ok(())) => successes += 1,
                Ok(Err(e)) => assert_eq!(e, DirectoryError::DuplicateEmail),
                Err(e) => return Err(DirectoryError::Internal(e.to_string())),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(directory.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn with_seed_registers_in_order() -> Result<()> {
        let directory =
            AccountDirectory::with_seed(DirectoryConfig::new(), &default_seed()).await?;

        assert_eq!(directory.len().await, 1);
        let user = directory
            .authenticate("test@town.com", &secret("password123"))
            .await?;
        assert_eq!(user.username, "Vecino1");
        Ok(())
    }

    #[tokio::test]
    async fn with_seed_rejects_duplicate_emails() {
        let seeds = [
            SeedAccount::new("Ana", "ana@x.com", "secret1"),
            SeedAccount::new("Bea", "ana@x.com", "secret2"),
        ];

        let result = AccountDirectory::with_seed(DirectoryConfig::new(), &seeds).await;
        assert!(matches!(result, Err(DirectoryError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn seeds_bypass_password_length_policy() -> Result<()> {
        let config = DirectoryConfig::new().with_min_password_length(12);
        let directory = AccountDirectory::with_seed(config, &default_seed()).await?;

        let user = directory
            .authenticate("test@town.com", &secret("password123"))
            .await?;
        assert_eq!(user.username, "Vecino1");

        // signups are still held to the minimum
        let result = directory
            .register("Ana", "ana@x.com", &secret("password123"))
            .await;
        assert_eq!(result, Err(DirectoryError::WeakPassword { min: 12 }));
        assert_eq!(directory.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn empty_username_is_accepted() -> Result<()> {
        let directory = AccountDirectory::new(DirectoryConfig::new());
        directory
            .register("", "e@x.com", &secret("secret1"))
            .await?;

        let user = directory.authenticate("e@x.com", &secret("secret1")).await?;
        assert_eq!(user.username, "");
        assert_eq!(user.email, "e@x.com");
        Ok(())
    }

    #[tokio::test]
    async fn empty_email_is_a_valid_key() -> Result<()> {
        let directory = AccountDirectory::new(DirectoryConfig::new());
        directory.register("Ana", "", &secret("secret1")).await?;

        let user = directory.authenticate("", &secret("secret1")).await?;
        assert_eq!(user.username, "Ana");
        assert_eq!(user.email, "");

        let result = directory.register("Bea", "", &secret("secret2")).await;
        assert_eq!(result, Err(DirectoryError::DuplicateEmail));
        assert_eq!(directory.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn empty_seed_gives_empty_directory() -> Result<()> {
        let directory = AccountDirectory::with_seed(DirectoryConfig::new(), &[]).await?;
        assert!(directory.is_empty().await);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_applied_to_each_request() -> Result<()> {
        let config = DirectoryConfig::new().with_latency(Duration::from_millis(1500));
        let directory = AccountDirectory::new(config);

        let started = tokio::time::Instant::now();
        directory
            .register("Ana", "ana@x.com", &secret("secret1"))
            .await?;
        assert!(started.elapsed() >= Duration::from_millis(1500));

        let started = tokio::time::Instant::now();
        let _ = directory.authenticate("missing@x.com", &secret("x")).await;
        assert!(started.elapsed() >= Duration::from_millis(1500));
        Ok(())
    }

    #[tokio::test]
    async fn outcome_helpers_wrap_results() -> Result<()> {
        let directory = AccountDirectory::new(DirectoryConfig::new());

        let outcome = directory
            .register_outcome("Ana", "ana@x.com", &secret("secret1"))
            .await;
        assert!(outcome.success);

        let outcome = directory
            .authenticate_outcome("ana@x.com", &secret("secret1"))
            .await;
        assert!(outcome.success);
        assert_eq!(outcome.user.map(|u| u.username), Some("Ana".to_string()));

        let outcome = directory
            .authenticate_outcome("ana@x.com", &secret("nope"))
            .await;
        assert!(!outcome.success);
        Ok(())
    }
}
