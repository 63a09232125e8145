use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Aggregated validation failures collected during `Config::from_env`.
    ///
    /// Every problem found is reported at once rather than one per restart.
    #[error("Configuration errors: {0}")]
    Invalid(String),
}
