//! Integration tests for configuration loading

use classwatch::infra::{Config, CutoffMode};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[telegram]
bot_token = "123456:test-token"
chat_id = "-1001234567890"

[feed]
sheet_id = "sheet-abc"
timeout_ms = 5000

[schedule]
group_id = "7A"
check_times = ["07:30", "13:15"]
cutoff = "after-yesterday"
cancel_marker = "cancelled"
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.bot_token(), "123456:test-token");
    assert_eq!(config.chat_id(), "-1001234567890");
    assert_eq!(config.sheet_id(), "sheet-abc");
    assert_eq!(config.feed_timeout_ms(), 5000);
    assert_eq!(config.group_id(), "7A");
    assert_eq!(config.check_times(), &["07:30", "13:15"]);
    assert_eq!(config.cutoff(), CutoffMode::AfterYesterday);
    assert_eq!(config.cancel_marker(), "cancelled");
}

#[test]
fn test_optional_fields_default() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[telegram]
bot_token = "123456:test-token"
chat_id = "-1001234567890"

[feed]
sheet_id = "sheet-abc"

[schedule]
group_id = "7A"
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.feed_timeout_ms(), 10_000);
    assert_eq!(config.check_times(), &["06:00", "12:00", "18:00"]);
    assert_eq!(config.cutoff(), CutoffMode::AfterToday);
    assert_eq!(config.cancel_marker(), "отмена");
}

#[test]
fn test_missing_required_section_fails() {
    let mut temp_file = NamedTempFile::new().unwrap();

    // No [telegram] section: loading must fail, not fall back to defaults
    let config_content = r#"
[feed]
sheet_id = "sheet-abc"

[schedule]
group_id = "7A"
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    assert!(Config::from_file(temp_file.path()).is_err());
}

#[test]
fn test_missing_file_fails() {
    assert!(Config::from_file("/nonexistent/config.toml").is_err());
}
