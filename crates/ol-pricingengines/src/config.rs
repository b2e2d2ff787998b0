//! Engine configuration.
//!
//! Lattice pricing costs `O(N²)` time and memory, so the engine bounds the
//! step count. What happens above the bound is a policy choice.

use ol_core::{Error, Result, Size};
use std::str::FromStr;

/// Default upper bound on the number of lattice steps.
///
/// A 2000-step trinomial call allocates two `4001 × 2001` grids (~128 MB).
pub const DEFAULT_MAX_STEPS: Size = 2000;

/// What to do when a request exceeds [`EngineConfig::max_steps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StepLimitPolicy {
    /// Fail the call with `InvalidParameter`.
    #[default]
    Reject,
    /// Log a warning and price anyway.
    Warn,
}

impl FromStr for StepLimitPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(StepLimitPolicy::Reject),
            "warn" => Ok(StepLimitPolicy::Warn),
            other => Err(Error::Config(format!(
                "unknown step limit policy '{other}' (expected reject or warn)"
            ))),
        }
    }
}

/// Resource policy for a [`LatticeEngine`](crate::LatticeEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Largest step count priced without triggering `step_limit`.
    pub max_steps: Size,
    /// Action taken above `max_steps`.
    pub step_limit: StepLimitPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            step_limit: StepLimitPolicy::Reject,
        }
    }
}

impl EngineConfig {
    /// Environment variable holding `max_steps`.
    pub const MAX_STEPS_VAR: &'static str = "OPTLATTICE_MAX_STEPS";
    /// Environment variable holding the step limit policy.
    pub const STEP_POLICY_VAR: &'static str = "OPTLATTICE_STEP_POLICY";

    /// Set the step bound.
    pub fn with_max_steps(mut self, max_steps: Size) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the policy applied above the bound.
    pub fn with_step_limit(mut self, policy: StepLimitPolicy) -> Self {
        self.step_limit = policy;
        self
    }

    /// Read the configuration from the process environment, falling back to
    /// the defaults for unset variables.
    ///
    /// # Errors
    /// [`Error::Config`] if a variable is set but malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(Self::MAX_STEPS_VAR) {
            config.max_steps = raw.trim().parse::<Size>().map_err(|e| {
                Error::Config(format!("{}: '{raw}' is not a step count: {e}", Self::MAX_STEPS_VAR))
            })?;
        }
        if let Some(raw) = lookup(Self::STEP_POLICY_VAR) {
            config.step_limit = raw.parse()?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(config.step_limit, StepLimitPolicy::Reject);
    }

    #[test]
    fn reads_both_variables() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("OPTLATTICE_MAX_STEPS", " 500 "),
            ("OPTLATTICE_STEP_POLICY", "Warn"),
        ]))
        .unwrap();
        assert_eq!(config.max_steps, 500);
        assert_eq!(config.step_limit, StepLimitPolicy::Warn);
    }

    #[test]
    fn negative_step_bound_is_a_config_error() {
        let err = EngineConfig::from_lookup(lookup(&[("OPTLATTICE_MAX_STEPS", "-3")])).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("OPTLATTICE_MAX_STEPS")));
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let err =
            EngineConfig::from_lookup(lookup(&[("OPTLATTICE_STEP_POLICY", "clamp")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
