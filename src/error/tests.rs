//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod coach_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = CoachError::from(json_error);

        match error {
            CoachError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = CoachError::from(io_error);

        match error {
            CoachError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "week_nine".parse::<u16>().unwrap_err();
        let error = CoachError::from(parse_error);

        match error {
            CoachError::InvalidNumber(_) => (),
            _ => panic!("Expected InvalidNumber error variant"),
        }
    }

    #[test]
    fn test_anyhow_error_becomes_storage() {
        let error = CoachError::from(anyhow::anyhow!("disk full"));

        match &error {
            CoachError::Storage { message } => assert_eq!(message, "disk full"),
            _ => panic!("Expected Storage error variant"),
        }
        assert!(error.to_string().contains("disk full"));
    }

    #[test]
    fn test_invalid_position_message() {
        let error = CoachError::InvalidPosition {
            position: "XYZ".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid position: XYZ");
    }

    #[test]
    fn test_only_feature_map_is_invariant_violation() {
        let malformed = CoachError::MalformedFeatureMap {
            feature: "week".to_string(),
        };
        assert!(malformed.is_invariant_violation());
        assert!(malformed.to_string().contains("week"));

        let unavailable = CoachError::SourceUnavailable {
            message: "timeout".to_string(),
        };
        assert!(!unavailable.is_invariant_violation());
    }
}
