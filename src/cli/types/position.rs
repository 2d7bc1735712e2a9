//! Fantasy football position types.

use crate::error::CoachError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy football player positions.
///
/// Models are trained per position, so the enum doubles as the bucketing key
/// for training samples. By default only QB, RB, WR and TE are trained.
///
/// # Examples
///
/// ```rust
/// use fantasy_coach::Position;
///
/// let qb: Position = "qb".parse().unwrap();
/// assert_eq!(qb, Position::QB);
/// assert_eq!(Position::DEF.to_string(), "D/ST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    #[serde(alias = "D/ST", alias = "DST")]
    DEF,
}

impl Position {
    /// Positions the trainer fits models for unless configured otherwise.
    pub const TRAINED: [Position; 4] = [Position::QB, Position::RB, Position::WR, Position::TE];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "D/ST",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            "DEF" | "D/ST" | "DST" => Ok(Position::DEF),
            _ => Err(CoachError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_string_conversion() {
        assert_eq!(Position::QB.to_string(), "QB");
        assert_eq!(Position::RB.to_string(), "RB");
        assert_eq!(Position::WR.to_string(), "WR");
        assert_eq!(Position::TE.to_string(), "TE");
        assert_eq!(Position::K.to_string(), "K");
        assert_eq!(Position::DEF.to_string(), "D/ST");
    }

    #[test]
    fn test_position_parsing_is_case_insensitive() {
        assert_eq!("wr".parse::<Position>().unwrap(), Position::WR);
        assert_eq!("D/ST".parse::<Position>().unwrap(), Position::DEF);
        assert_eq!("dst".parse::<Position>().unwrap(), Position::DEF);

        match "FLEX".parse::<Position>() {
            Err(CoachError::InvalidPosition { position }) => assert_eq!(position, "FLEX"),
            other => panic!("Expected InvalidPosition, got {:?}", other),
        }
    }

    #[test]
    fn test_serde_accepts_dst_alias() {
        let pos: Position = serde_json::from_str("\"D/ST\"").unwrap();
        assert_eq!(pos, Position::DEF);
        let pos: Position = serde_json::from_str("\"TE\"").unwrap();
        assert_eq!(pos, Position::TE);
    }

    #[test]
    fn test_trained_positions() {
        assert_eq!(Position::TRAINED.len(), 4);
        assert!(!Position::TRAINED.contains(&Position::K));
        assert!(!Position::TRAINED.contains(&Position::DEF));
    }
}
