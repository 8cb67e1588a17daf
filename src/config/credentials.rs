use anyhow::{anyhow, Result};
use std::fmt;

/// Vendor api key. Debug output is redacted.
#[derive(Clone)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read the key from `var`. Unset or blank is a startup error.
    pub fn from_env(var: &str) -> Result<Self> {
        let value = std::env::var(var)
            .map_err(|_| anyhow!("required environment variable {} is not set", var))?;
        if value.trim().is_empty() {
            return Err(anyhow!("required environment variable {} is empty", var));
        }
        Ok(Self(value.trim().to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}
