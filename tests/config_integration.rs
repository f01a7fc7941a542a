use std::path::PathBuf;

use mdsplit::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use mdsplit::theme::Theme;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mdsplitrc");
    let content = r#"
# comment
--no-scroll-sync

--theme light

--log=mdsplit.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_scroll_sync);
    assert_eq!(flags.theme, Some(Theme::Light));
    assert_eq!(flags.log, Some(PathBuf::from("mdsplit.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mdsplitrc");
    let content = "--no-preview\n--theme light\n--store notes\n--debounce-ms 400\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "mdsplit".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--debounce-ms=120".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_preview, "file flags should remain enabled");
    assert_eq!(effective.theme, Some(Theme::Dark), "cli should override theme");
    assert_eq!(effective.debounce_ms, Some(120));
    assert_eq!(
        effective.store,
        Some(PathBuf::from("notes")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        no_preview: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        no_scroll_sync: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.no_preview);
    assert!(merged.no_scroll_sync);
}
