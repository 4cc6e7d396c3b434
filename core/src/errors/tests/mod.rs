//! Unit tests for domain errors

use crate::errors::{DomainError, TokenError};

#[test]
fn test_token_error_bridges_into_domain_error() {
    let error: DomainError = TokenError::Expired.into();
    assert!(matches!(error, DomainError::Token(TokenError::Expired)));
    assert_eq!(error.to_string(), "Token expired");
}

#[test]
fn test_storage_error_keeps_message() {
    let error = DomainError::Storage {
        message: "deadline exceeded".to_string(),
    };
    assert!(error.to_string().contains("deadline exceeded"));
}

#[test]
fn test_token_error_codes_are_distinct() {
    let errors = [
        TokenError::Malformed,
        TokenError::InvalidSignature,
        TokenError::DisallowedAlgorithm {
            algorithm: "RS256".to_string(),
        },
        TokenError::Expired,
        TokenError::NotYetValid,
        TokenError::InvalidClaims,
        TokenError::MissingClaim {
            claim: "exp".to_string(),
        },
        TokenError::GenerationFailed,
    ];

    let mut codes: Vec<&str> = errors.iter().map(|e| e.error_code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_disallowed_algorithm_message_names_algorithm() {
    let error = TokenError::DisallowedAlgorithm {
        algorithm: "ES256".to_string(),
    };
    assert_eq!(error.to_string(), "Disallowed signing algorithm: ES256");
}
