//! ID types for players and teams.

use crate::error::{CoachError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for player identifiers.
///
/// Historical feeds key players by slug-style strings (`"mahomes_patrick"`),
/// so the wrapper holds a `String` rather than a numeric id.
///
/// # Examples
///
/// ```rust
/// use fantasy_coach::PlayerId;
///
/// let id = PlayerId::new("gibbs_jahmyr");
/// assert_eq!(id.as_str(), "gibbs_jahmyr");
/// assert_eq!(id.to_string(), "gibbs_jahmyr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().to_string()))
    }
}

/// NFL team abbreviation, always stored upper-case (`KC`, `BAL`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TeamCode(String);

impl TeamCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TeamCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(TeamCode::new(raw))
    }
}

impl fmt::Display for TeamCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamCode {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(TeamCode::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_code_is_uppercased() {
        assert_eq!(TeamCode::new(" kc ").as_str(), "KC");
        assert_eq!("bal".parse::<TeamCode>().unwrap(), TeamCode::new("BAL"));
    }

    #[test]
    fn test_team_code_deserializes_normalized() {
        let code: TeamCode = serde_json::from_str("\"det\"").unwrap();
        assert_eq!(code.as_str(), "DET");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"DET\"");
    }

    #[test]
    fn test_player_id_roundtrips_as_plain_string() {
        let id: PlayerId = serde_json::from_str("\"nacua_puka\"").unwrap();
        assert_eq!(id, PlayerId::new("nacua_puka"));
    }
}
