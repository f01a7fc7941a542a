use std::path::Path;

use mdsplit::document::WELCOME_DOCUMENT;
use mdsplit::export::{ExportFormat, ExportOutcome};
use mdsplit::format::FormatAction;
use mdsplit::session::{SaveOutcome, Session, SessionConfig};
use mdsplit::storage::{CONTENT_KEY, DirStore, KeyValueStore, THEME_KEY};
use mdsplit::theme::Theme;

fn fast_config() -> SessionConfig {
    SessionConfig {
        debounce_ms: 50,
        autosave_ms: 1_000,
        ..SessionConfig::default()
    }
}

fn load(dir: &Path) -> Session {
    Session::load(Box::new(DirStore::new(dir)), fast_config(), 0).unwrap()
}

#[test]
fn test_first_run_seeds_welcome_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let session = load(dir.path());

    assert_eq!(session.document().text(), WELCOME_DOCUMENT);
    assert!(!session.is_dirty());
    assert!(session.stats().words > 0);
    assert!(!dir.path().join(CONTENT_KEY).exists());
}

#[test]
fn test_edits_autosave_and_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONTENT_KEY), "# Notes\n").unwrap();

    let mut session = load(dir.path());
    session.buffer_mut().move_to_end();
    session.edit(10, |buf| buf.insert_str("first line"));
    assert!(session.is_dirty());

    let outcome = session.tick(100);
    assert!(outcome.refreshed);
    assert!(outcome.autosave.is_none());
    assert_eq!(session.stats().words, 3);

    let outcome = session.tick(1_000);
    assert!(matches!(outcome.autosave, Some(Ok(SaveOutcome::Written))));
    assert!(!session.is_dirty());

    let reloaded = load(dir.path());
    assert_eq!(reloaded.document().text(), "# Notes\nfirst line");
    assert!(!reloaded.is_dirty());
}

#[test]
fn test_clean_session_does_not_autosave() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = load(dir.path());

    let outcome = session.tick(5_000);
    assert!(outcome.autosave.is_none());
    assert!(!dir.path().join(CONTENT_KEY).exists());
}

#[test]
fn test_new_document_persists_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = load(dir.path());

    assert_eq!(session.new_document().unwrap(), SaveOutcome::Written);
    assert_eq!(session.stats().words, 0);

    let store = DirStore::new(dir.path());
    assert_eq!(store.get(CONTENT_KEY).unwrap().as_deref(), Some(""));
    // Empty stored content reads as a first run.
    assert_eq!(load(dir.path()).document().text(), WELCOME_DOCUMENT);
}

#[test]
fn test_theme_choice_persists_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = load(dir.path());
    assert_eq!(session.theme(), Theme::Light);

    assert_eq!(session.toggle_theme().unwrap(), Theme::Dark);
    assert_eq!(
        std::fs::read_to_string(dir.path().join(THEME_KEY)).unwrap(),
        "dark"
    );
    assert_eq!(load(dir.path()).theme(), Theme::Dark);

    let forced = SessionConfig {
        theme: Some(Theme::Light),
        ..fast_config()
    };
    let session = Session::load(Box::new(DirStore::new(dir.path())), forced, 0).unwrap();
    assert_eq!(session.theme(), Theme::Light);
}

#[test]
fn test_format_then_export_every_file_format() {
    let store_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    std::fs::write(store_dir.path().join(CONTENT_KEY), "plain").unwrap();

    let mut session = load(store_dir.path());
    session.buffer_mut().select_all();
    session.apply_format(FormatAction::Bold);
    assert_eq!(session.document().text(), "**plain**");

    let outcome = session
        .export(ExportFormat::Markdown, out_dir.path(), "out")
        .unwrap();
    let md_path = out_dir.path().join("out.md");
    assert_eq!(outcome, ExportOutcome::Written(md_path.clone()));
    assert_eq!(std::fs::read_to_string(md_path).unwrap(), "**plain**");

    session
        .export(ExportFormat::Html, out_dir.path(), "out")
        .unwrap();
    let html = std::fs::read_to_string(out_dir.path().join("out.html")).unwrap();
    assert!(html.contains("<strong>plain</strong>"));
    assert!(html.contains("<html"));

    session
        .export(ExportFormat::Text, out_dir.path(), "")
        .unwrap();
    let text = std::fs::read_to_string(out_dir.path().join("document.txt")).unwrap();
    assert_eq!(text.trim(), "plain");
}

#[test]
fn test_export_sees_edits_before_refresh() {
    let store_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    std::fs::write(store_dir.path().join(CONTENT_KEY), "old").unwrap();

    let mut session = load(store_dir.path());
    session.edit(0, |buf| buf.replace_all("# new"));
    assert!(session.sync().is_pending());

    session
        .export(ExportFormat::Html, out_dir.path(), "live")
        .unwrap();
    let html = std::fs::read_to_string(out_dir.path().join("live.html")).unwrap();
    assert!(html.contains("new</h1>"));
    assert!(!html.contains("<p>old</p>"));
}

#[test]
fn test_open_file_replaces_document() {
    let store_dir = tempfile::tempdir().unwrap();
    let files = tempfile::tempdir().unwrap();
    let import = files.path().join("draft.markdown");
    std::fs::write(&import, "## Imported\n\ntwo words").unwrap();

    let mut session = load(store_dir.path());
    assert!(session.open_file(&import).unwrap());
    assert_eq!(session.document().text(), "## Imported\n\ntwo words");
    assert!(session.is_dirty());

    let skipped = files.path().join("photo.png");
    std::fs::write(&skipped, [0x89, b'P', b'N', b'G']).unwrap();
    assert!(!session.open_file(&skipped).unwrap());
    assert_eq!(session.document().text(), "## Imported\n\ntwo words");
}
