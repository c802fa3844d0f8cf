/*!
 * Tests for app configuration
 */

use subalign::alignment::OverflowPolicy;
use subalign::app_config::Config;

/// Test default configuration values
#[test]
fn test_defaultConfig_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.alignment.window_max, 4);
    assert_eq!(config.alignment.overflow_policy, OverflowPolicy::RepeatPrevious);
    assert_eq!(config.formatting.line_char_budget, 14);
    assert_eq!(config.formatting.break_tolerance, 8);
    assert!(!config.rewrite.enabled);
    assert_eq!(config.rewrite.model, "deepseek-chat");
    assert_eq!(config.rewrite.full_pass_threshold, 120);
    assert_eq!(config.rewrite.chunk_size, 80);
    assert!(config.variant_table.is_empty());
    assert!(config.validate().is_ok());
}

/// Test that an empty JSON object deserializes to the defaults
#[test]
fn test_deserialize_withEmptyObject_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.alignment.window_max, 4);
    assert!(config.validate().is_ok());
}

/// Test serde round trip
#[test]
fn test_serde_roundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.alignment.window_max = 3;
    config.alignment.overflow_policy = OverflowPolicy::LeaveBlank;
    config.formatting.line_char_budget = 12;
    config.rewrite.enabled = true;
    config
        .variant_table
        .insert("她".to_string(), "他".to_string());

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.alignment.window_max, 3);
    assert_eq!(parsed.alignment.overflow_policy, OverflowPolicy::LeaveBlank);
    assert_eq!(parsed.formatting.line_char_budget, 12);
    assert!(parsed.rewrite.enabled);
    assert_eq!(parsed.variant_table.get("她").map(String::as_str), Some("他"));
}

/// Test that the overflow policy uses snake_case names on the wire
#[test]
fn test_overflowPolicy_serdeNames() {
    let json = serde_json::to_string(&OverflowPolicy::RepeatPrevious).unwrap();
    assert_eq!(json, "\"repeat_previous\"");
    let parsed: OverflowPolicy = serde_json::from_str("\"leave_blank\"").unwrap();
    assert_eq!(parsed, OverflowPolicy::LeaveBlank);
}

/// Test validation failures
#[test]
fn test_validate_withBadValues_shouldFail() {
    let mut config = Config::default();
    config.alignment.window_max = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.alignment.window_max = 99;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.formatting.line_char_budget = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.rewrite.enabled = true;
    config.rewrite.endpoint = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.rewrite.enabled = true;
    config.rewrite.model = "  ".to_string();
    assert!(config.validate().is_err());
}
