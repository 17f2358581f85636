//! Error taxonomy unit tests

use itinerary_gateway::GatewayError;

#[test]
fn test_retryable_flags_are_fixed_per_variant() {
    let test_cases = vec![
        (GatewayError::Authentication("test".to_string()), false),
        (
            GatewayError::RateLimit {
                message: "test".to_string(),
                retry_after: None,
            },
            true,
        ),
        (
            GatewayError::Server {
                status: 500,
                message: "test".to_string(),
            },
            true,
        ),
        (GatewayError::Timeout("test".to_string()), true),
        (GatewayError::Network("test".to_string()), true),
        (GatewayError::ResponseParsing("test".to_string()), false),
        (
            GatewayError::Client {
                status: 422,
                message: "test".to_string(),
            },
            false,
        ),
        (GatewayError::Configuration("test".to_string()), false),
    ];

    for (error, expected_retryable) in test_cases {
        assert_eq!(
            error.is_retryable(),
            expected_retryable,
            "wrong retryability for {:?}",
            error
        );
    }
}

#[test]
fn test_error_kinds() {
    let test_cases = vec![
        (
            GatewayError::Authentication("test".to_string()),
            "authentication_error",
        ),
        (
            GatewayError::RateLimit {
                message: "test".to_string(),
                retry_after: Some(1),
            },
            "rate_limit_error",
        ),
        (
            GatewayError::Server {
                status: 502,
                message: "test".to_string(),
            },
            "server_error",
        ),
        (GatewayError::Timeout("test".to_string()), "timeout_error"),
        (GatewayError::Network("test".to_string()), "network_error"),
        (
            GatewayError::ResponseParsing("test".to_string()),
            "response_parsing_error",
        ),
        (
            GatewayError::Client {
                status: 404,
                message: "test".to_string(),
            },
            "client_error",
        ),
        (
            GatewayError::Configuration("test".to_string()),
            "configuration_error",
        ),
    ];

    for (error, expected_kind) in test_cases {
        assert_eq!(error.kind(), expected_kind);
    }
}

#[test]
fn test_status_mapping_covers_server_range() {
    for status in [500u16, 501, 502, 503, 504, 520, 599] {
        match GatewayError::from_status(status, "upstream failure", None) {
            GatewayError::Server {
                status: carried, ..
            } => assert_eq!(carried, status),
            other => panic!("expected server error for {}, got {:?}", status, other),
        }
    }
}

#[test]
fn test_status_mapping_covers_client_range() {
    for status in [400u16, 403, 404, 409, 418, 422] {
        match GatewayError::from_status(status, "rejected", None) {
            GatewayError::Client {
                status: carried, ..
            } => assert_eq!(carried, status),
            other => panic!("expected client error for {}, got {:?}", status, other),
        }
    }
}

#[test]
fn test_status_mapping_special_cases() {
    assert!(matches!(
        GatewayError::from_status(401, "", None),
        GatewayError::Authentication(_)
    ));
    assert!(matches!(
        GatewayError::from_status(429, "", Some(5)),
        GatewayError::RateLimit {
            retry_after: Some(5),
            ..
        }
    ));
}

#[test]
fn test_retry_after_only_on_rate_limit() {
    assert_eq!(
        GatewayError::from_status(429, "", Some(12)).retry_after_secs(),
        Some(12)
    );
    assert_eq!(
        GatewayError::from_status(429, "", None).retry_after_secs(),
        None
    );
    assert_eq!(
        GatewayError::from_status(503, "", None).retry_after_secs(),
        None
    );
}

#[test]
fn test_display_messages() {
    let err = GatewayError::Server {
        status: 503,
        message: "overloaded".to_string(),
    };
    assert_eq!(err.to_string(), "Server error (503): overloaded");

    let err = GatewayError::Authentication("Invalid API key".to_string());
    assert_eq!(err.to_string(), "Authentication failed: Invalid API key");

    let err = GatewayError::ResponseParsing("Missing content in response".to_string());
    assert_eq!(
        err.to_string(),
        "Failed to parse response: Missing content in response"
    );
}
