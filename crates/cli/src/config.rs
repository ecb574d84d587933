use kontask_client::config::{ClientConfig, ConfigError};
use kontask_core::availability::DEFAULT_HORIZON_DAYS;

/// Settings for one headless setup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    /// Supplier whose profile is set up.
    pub supplier_id: String,
    /// Days of availability materialized from the weekly template.
    pub horizon_days: u32,
    pub client: ClientConfig,
}

impl SetupConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `SUPPLIER_ID`          | required                |
    /// | `HORIZON_DAYS`         | `50`                    |
    /// | `API_SERVER`           | `http://localhost:8000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let supplier_id = lookup("SUPPLIER_ID")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if supplier_id.is_empty() {
            return Err(ConfigError {
                var: "SUPPLIER_ID",
                expected: "set to a supplier id",
                value: supplier_id,
            });
        }

        let horizon_days = match lookup("HORIZON_DAYS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(days) if days > 0 => days,
                _ => {
                    return Err(ConfigError {
                        var: "HORIZON_DAYS",
                        expected: "a positive u32",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_HORIZON_DAYS,
        };

        Ok(Self {
            supplier_id,
            horizon_days,
            client: ClientConfig::from_lookup(&lookup)?,
        })
    }
}
