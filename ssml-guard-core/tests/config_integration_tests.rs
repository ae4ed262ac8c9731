// ssml-guard-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use test_log::test;

use ssml_guard_core::config::{self, PatternRule, SsmlConfig};
use ssml_guard_core::{PatternRegistry, SsmlError, TagPreservingEscaper};

#[test]
fn test_load_default_rules() {
    let config = SsmlConfig::load_default_rules().unwrap();
    assert!(!config.preserve_tags.is_empty());
    assert!(config.preserve_tags.iter().any(|r| r.name == "break"));
    assert!(config.preserve_tags.iter().any(|r| r.name == "prosody"));
}

#[test]
fn test_default_rules_compile_and_preserve_common_tags() -> Result<()> {
    let config = SsmlConfig::load_default_rules()?;
    let registry = Arc::new(PatternRegistry::from_config(&config)?);
    assert_eq!(registry.len(), config.preserve_tags.len());

    let escaper = TagPreservingEscaper::new(registry);
    let input = r#"<speak><prosody rate="slow">Tom & Jerry</prosody><break time="300ms"/><say-as interpret-as="digits">42</say-as> < 5</speak>"#;
    let expected = r#"<speak><prosody rate="slow">Tom &amp; Jerry</prosody><break time="300ms"/><say-as interpret-as="digits">42</say-as> &lt; 5</speak>"#;
    assert_eq!(escaper.escape(input), expected);
    Ok(())
}

#[test]
fn test_default_paragraph_rule_does_not_catch_sub_or_say_as() -> Result<()> {
    let config = SsmlConfig::load_default_rules()?;
    let registry = PatternRegistry::from_config(&config)?;
    let paragraph = registry.get("paragraph").expect("paragraph rule");
    assert!(paragraph.is_match("<s>"));
    assert!(paragraph.is_match("</p>"));
    assert!(!paragraph.is_match("<sub alias=\"x\">"));
    assert!(!paragraph.is_match("<say-as>"));
    assert!(!paragraph.is_match("<speak>"));
    Ok(())
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
server:
  port: 8080
  base_path: /api
tts:
  region: eastasia
  voice_mapping:
    alloy: zh-CN-XiaoxiaoNeural
ssml:
  preserve_tags:
    - name: break
      pattern: '<break\b[^>]*/>'
      description: "pauses"
    - name: voice
      pattern: '</?voice\b[^>]*>'
      case_insensitive: true
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = SsmlConfig::load_from_file(file.path())?;
    assert_eq!(config.preserve_tags.len(), 2);
    assert_eq!(config.preserve_tags[0].name, "break");
    assert_eq!(config.preserve_tags[0].description.as_deref(), Some("pauses"));
    assert!(config.preserve_tags[1].case_insensitive);
    Ok(())
}

#[test]
fn test_load_from_missing_file_mentions_path() {
    let err = SsmlConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("/definitely/not/here.yaml"));
}

#[test]
fn test_load_from_file_rejects_duplicates() -> Result<()> {
    let yaml_content = r#"
preserve_tags:
  - name: break
    pattern: '<break/>'
  - name: break
    pattern: '<break />'
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = SsmlConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Duplicate rule name found: 'break'"));
    Ok(())
}

#[test]
fn test_invalid_pattern_in_file_fails_registry_with_rule_name() -> Result<()> {
    let yaml_content = "preserve_tags:\n  - name: broken\n    pattern: '('\n";
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    // Structure is fine, so loading succeeds; compiling is what fails.
    let config = SsmlConfig::load_from_file(file.path())?;
    match PatternRegistry::from_config(&config) {
        Err(SsmlError::PatternCompile { rule_name, .. }) => assert_eq!(rule_name, "broken"),
        other => panic!("expected a compile error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_merge_rules_no_user_config() {
    let default_config = SsmlConfig {
        preserve_tags: vec![PatternRule::new("break", "<break/>")],
    };
    let merged = config::merge_rules(default_config.clone(), None);
    assert_eq!(merged, default_config);
}

#[test]
fn test_merge_rules_override_keeps_position() -> Result<()> {
    let defaults = SsmlConfig::load_default_rules()?;
    let position = defaults
        .preserve_tags
        .iter()
        .position(|r| r.name == "break")
        .expect("break rule");

    let user = SsmlConfig {
        preserve_tags: vec![
            PatternRule::new("break", "<break time=\"[0-9]+ms\"/>"),
            PatternRule::new("bookmark", "<bookmark\\b[^>]*/>"),
        ],
    };
    let default_len = defaults.preserve_tags.len();
    let merged = config::merge_rules(defaults, Some(user));

    assert_eq!(merged.preserve_tags.len(), default_len + 1);
    assert_eq!(merged.preserve_tags[position].pattern, "<break time=\"[0-9]+ms\"/>");
    assert_eq!(merged.preserve_tags.last().map(|r| r.name.as_str()), Some("bookmark"));
    Ok(())
}
