//! Season calendar types.

use crate::error::{CoachError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2024)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Portion of the regular season a week falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonPhase {
    Early,
    Mid,
    Late,
}

/// Type-safe wrapper for Week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week(pub u16);

impl Week {
    /// Weeks in a regular season, used to scale the week feature to 0-1.
    pub const REGULAR_SEASON_WEEKS: u16 = 17;

    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Weeks 1-6 are early, 7-12 mid, everything after is late.
    pub fn phase(&self) -> SeasonPhase {
        match self.0 {
            0..=6 => SeasonPhase::Early,
            7..=12 => SeasonPhase::Mid,
            _ => SeasonPhase::Late,
        }
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_phase_boundaries() {
        assert_eq!(Week::new(1).phase(), SeasonPhase::Early);
        assert_eq!(Week::new(4).phase(), SeasonPhase::Early);
        assert_eq!(Week::new(6).phase(), SeasonPhase::Early);
        assert_eq!(Week::new(7).phase(), SeasonPhase::Mid);
        assert_eq!(Week::new(9).phase(), SeasonPhase::Mid);
        assert_eq!(Week::new(12).phase(), SeasonPhase::Mid);
        assert_eq!(Week::new(13).phase(), SeasonPhase::Late);
        assert_eq!(Week::new(15).phase(), SeasonPhase::Late);
    }

    #[test]
    fn test_parse_season_and_week() {
        assert_eq!("2023".parse::<Season>().unwrap(), Season::new(2023));
        assert_eq!("9".parse::<Week>().unwrap(), Week::new(9));
        assert!("nine".parse::<Week>().is_err());
    }
}
