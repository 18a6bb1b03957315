//! Run configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default fraction of document sentences kept in the initial summary.
pub const DEFAULT_RATIO: f64 = 0.3;
/// Default number of densification passes.
pub const DEFAULT_ITERATIONS: usize = 3;
/// Default number of missing entities considered per pass.
pub const DEFAULT_MAX_MISSING: usize = 3;
/// Character the crude substitution splitter breaks on.
pub const DEFAULT_DELIMITER: char = '.';

/// Top-level Densify configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensifyConfig {
    /// Fraction of sentences selected by the extractive step, in `(0, 1]`.
    pub ratio: f64,
    /// Number of densification passes.
    pub iteration_count: usize,
    /// Missing entities ranked per pass.
    pub max_missing_entities: usize,
    /// Sentence delimiter used during substitution.
    pub delimiter: char,
    /// Per-call timeout for external capabilities (none = wait indefinitely).
    pub capability_timeout_ms: Option<u64>,
}

impl Default for DensifyConfig {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            iteration_count: DEFAULT_ITERATIONS,
            max_missing_entities: DEFAULT_MAX_MISSING,
            delimiter: DEFAULT_DELIMITER,
            capability_timeout_ms: None,
        }
    }
}

impl DensifyConfig {
    /// Build a validated configuration from a ratio and a signed pass count.
    pub fn new(ratio: f64, iteration_count: i64) -> Result<Self> {
        let iteration_count = usize::try_from(iteration_count).map_err(|_| {
            Error::Configuration(format!(
                "iteration_count must be >= 0, got {}",
                iteration_count
            ))
        })?;
        let config = Self {
            ratio,
            iteration_count,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment and defaults.
    ///
    /// Reads `DENSIFY_RATIO`, `DENSIFY_ITERATIONS`, `DENSIFY_MAX_MISSING`
    /// and `DENSIFY_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("DENSIFY_RATIO") {
            config.ratio = parse_value("DENSIFY_RATIO", &raw)?;
        }
        if let Some(raw) = lookup("DENSIFY_ITERATIONS") {
            let count: i64 = parse_value("DENSIFY_ITERATIONS", &raw)?;
            config.iteration_count = usize::try_from(count).map_err(|_| {
                Error::Configuration(format!("DENSIFY_ITERATIONS must be >= 0, got {}", count))
            })?;
        }
        if let Some(raw) = lookup("DENSIFY_MAX_MISSING") {
            config.max_missing_entities = parse_value("DENSIFY_MAX_MISSING", &raw)?;
        }
        if let Some(raw) = lookup("DENSIFY_TIMEOUT_MS") {
            config.capability_timeout_ms = Some(parse_value("DENSIFY_TIMEOUT_MS", &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values before any processing happens.
    pub fn validate(&self) -> Result<()> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 || self.ratio > 1.0 {
            return Err(Error::Configuration(format!(
                "ratio must be in (0, 1], got {}",
                self.ratio
            )));
        }
        if self.max_missing_entities == 0 {
            return Err(Error::Configuration(
                "max_missing_entities must be at least 1".into(),
            ));
        }
        if self.delimiter.is_whitespace() {
            return Err(Error::Configuration(
                "delimiter must not be whitespace".into(),
            ));
        }
        if self.capability_timeout_ms == Some(0) {
            return Err(Error::Configuration(
                "capability timeout must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn capability_timeout(&self) -> Option<Duration> {
        self.capability_timeout_ms.map(Duration::from_millis)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    tracing::debug!("Config override from environment: {}={}", key, raw);
    raw.trim()
        .parse()
        .map_err(|_| Error::Configuration(format!("{} has an invalid value: {:?}", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = DensifyConfig::default();
        assert_eq!(config.ratio, 0.3);
        assert_eq!(config.iteration_count, 3);
        assert_eq!(config.max_missing_entities, 3);
        assert_eq!(config.delimiter, '.');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ratio_bounds() {
        assert!(DensifyConfig::new(1.0, 3).is_ok());
        assert!(matches!(DensifyConfig::new(0.0, 3), Err(Error::Configuration(_))));
        assert!(matches!(DensifyConfig::new(-0.5, 3), Err(Error::Configuration(_))));
        assert!(matches!(DensifyConfig::new(1.01, 3), Err(Error::Configuration(_))));
        assert!(matches!(DensifyConfig::new(f64::NAN, 3), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_negative_iterations_rejected() {
        assert!(matches!(DensifyConfig::new(0.3, -1), Err(Error::Configuration(_))));
        assert_eq!(DensifyConfig::new(0.3, 0).unwrap().iteration_count, 0);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = DensifyConfig::from_lookup(lookup_from(&[
            ("DENSIFY_RATIO", "0.5"),
            ("DENSIFY_ITERATIONS", "5"),
            ("DENSIFY_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.ratio, 0.5);
        assert_eq!(config.iteration_count, 5);
        assert_eq!(config.max_missing_entities, 3);
        assert_eq!(config.capability_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = DensifyConfig::from_lookup(lookup_from(&[("DENSIFY_RATIO", "lots")]));
        assert!(matches!(err, Err(Error::Configuration(_))));

        let err = DensifyConfig::from_lookup(lookup_from(&[("DENSIFY_ITERATIONS", "-2")]));
        assert!(matches!(err, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: DensifyConfig = serde_json::from_str(r#"{"ratio": 0.5}"#).unwrap();
        assert_eq!(config.ratio, 0.5);
        assert_eq!(config.iteration_count, 3);
    }
}
