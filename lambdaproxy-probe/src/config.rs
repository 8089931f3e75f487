//! Probe configuration.
//!
//! Loaded from a TOML file whose string values may reference environment
//! variables as `$VAR` or `${VAR}`. A missing file yields the defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! method = "POST"
//! pretty = true
//!
//! [headers]
//! Authorization = "Bearer ${PROBE_TOKEN}"
//! Accept = "application/json"
//! ```
//!
//! # Environment Variables
//!
//! - `LAMBDAPROXY_PROBE_CONFIG` — Path to the configuration file (default: `probe.toml`)
//! - Any variable referenced by `$VAR` in the file

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

/// Defaults applied by the probe commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Method for requests built from flags (default: `GET`).
    #[serde(default = "default_method")]
    pub method: String,

    /// Headers added to every request built from flags, before any `-H`.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,
}

fn default_method() -> String {
    "GET".to_owned()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            headers: BTreeMap::new(),
            pretty: false,
        }
    }
}

impl ProbeConfig {
    /// Loads the configuration at `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Io`] if the file exists but cannot be read and
    /// [`ProbeError::Config`] if it cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ProbeError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProbeError::io(path.display().to_string(), e))?;
        Self::parse(&content, |name| std::env::var(name).ok())
    }

    /// Parses TOML after expanding variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] if the expanded text is not valid.
    pub fn parse<F>(content: &str, lookup: F) -> Result<Self, ProbeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(toml::from_str(&expand_vars(content, lookup))?)
    }
}

/// Replaces `$VAR` and `${VAR}` with the value returned by `lookup`.
///
/// References that `lookup` cannot resolve are kept verbatim.
fn expand_vars<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = after.strip_prefix('{').map_or_else(
            || {
                let end = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                (&after[..end], end)
            },
            |inner| inner.find('}').map_or(("", 0), |end| (&inner[..end], end + 2)),
        );

        match (name.is_empty(), lookup(name)) {
            (false, Some(value)) => out.push_str(&value),
            _ => out.push_str(&rest[pos..=pos + consumed]),
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}
