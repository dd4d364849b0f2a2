/// Log output format for the `petclinic` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be one of {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Runtime configuration loaded from environment variables.
///
/// | Env Var                      | Default |
/// |------------------------------|---------|
/// | `PETCLINIC_SEED_SAMPLE_DATA` | `true`  |
/// | `LOG_FORMAT`                 | `plain` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicConfig {
    /// Load the sample clinic into the store at start-up.
    pub seed_sample_data: bool,
    pub log_format: LogFormat,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            log_format: LogFormat::Plain,
        }
    }
}

impl ClinicConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed_sample_data = match lookup("PETCLINIC_SEED_SAMPLE_DATA") {
            None => defaults.seed_sample_data,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "PETCLINIC_SEED_SAMPLE_DATA",
                        value,
                        expected: "true, false",
                    })
                }
            },
        };

        let log_format = match lookup("LOG_FORMAT") {
            None => defaults.log_format,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "plain" | "" => LogFormat::Plain,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "LOG_FORMAT",
                        value,
                        expected: "plain, json",
                    })
                }
            },
        };

        Ok(Self {
            seed_sample_data,
            log_format,
        })
    }
}
