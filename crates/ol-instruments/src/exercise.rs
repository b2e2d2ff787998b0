//! Option exercise styles.
//!
//! An exercise style defines *when* an option can be exercised.

use ol_core::Error;
use std::fmt;
use std::str::FromStr;

/// Type of exercise right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseType {
    /// Can only be exercised at expiry.
    #[default]
    European,
    /// Can be exercised at any time up to expiry.
    American,
    /// Can be exercised on specific dates.
    Bermudan,
}

impl ExerciseType {
    /// Whether the holder may exercise before expiry at every lattice node.
    pub fn allows_early_exercise(self) -> bool {
        matches!(self, ExerciseType::American)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::European => write!(f, "European"),
            ExerciseType::American => write!(f, "American"),
            ExerciseType::Bermudan => write!(f, "Bermudan"),
        }
    }
}

impl FromStr for ExerciseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" | "eu" => Ok(ExerciseType::European),
            "american" | "am" => Ok(ExerciseType::American),
            "bermudan" => Ok(ExerciseType::Bermudan),
            other => Err(Error::UnsupportedOptionType(format!(
                "unknown exercise style '{other}'"
            ))),
        }
    }
}
