use std::time::Duration;

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Debug)]
pub struct DirectoryConfig {
    min_password_length: usize,
    latency: Duration,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_min_password_length(mut self, length: usize) -> Self {
        self.min_password_length = length;
        self
    }

    /// Delay applied before every request is served.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub const fn min_password_length(&self) -> usize {
        self.min_password_length
    }

    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    /// Length is counted in characters, not bytes.
    pub(super) fn is_weak(&self, password: &str) -> bool {
        password.chars().count() < self.min_password_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_config_defaults_and_overrides() {
        let config = DirectoryConfig::new();
        assert_eq!(config.min_password_length(), DEFAULT_MIN_PASSWORD_LENGTH);
        assert_eq!(config.latency(), Duration::ZERO);

        let config = config
            .with_min_password_length(8)
            .with_latency(Duration::from_millis(1500));
        assert_eq!(config.min_password_length(), 8);
        assert_eq!(config.latency(), Duration::from_millis(1500));
    }

    #[test]
    fn weak_password_counts_characters() {
        let config = DirectoryConfig::new();
        assert!(config.is_weak("12345"));
        assert!(!config.is_weak("123456"));
        // six characters, twelve bytes
        assert!(!config.is_weak("ñññççç"));
        assert!(config.is_weak("ñññçç"));
    }
}
