use daynote_core::{FsNoteStore, NoteStore, StoreOp};
use std::fs;

#[test]
fn ensure_directory_creates_missing_ancestors_once() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("2024").join("03");
    let store = FsNoteStore::new();

    assert!(store.ensure_directory(&target).unwrap());
    assert!(target.is_dir());
    assert!(!store.ensure_directory(&target).unwrap());
}

#[test]
fn ensure_directory_fails_when_path_component_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("2024");
    fs::write(&blocker, "not a directory").unwrap();
    let store = FsNoteStore::new();

    let err = store.ensure_directory(&blocker.join("03")).unwrap_err();
    assert_eq!(err.path, blocker.join("03"));

    let err = store.ensure_directory(&blocker).unwrap_err();
    assert_eq!(err.op, StoreOp::CreateDirectory);
}

#[test]
fn path_exists_reports_files_directories_and_absence() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("note.md");
    fs::write(&file, "x").unwrap();
    let store = FsNoteStore::new();

    assert!(store.path_exists(dir.path()).unwrap());
    assert!(store.path_exists(&file).unwrap());
    assert!(!store.path_exists(&dir.path().join("missing.md")).unwrap());
}

#[test]
fn create_file_writes_and_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("note.md");
    let store = FsNoteStore::new();

    store.create_file(&file, "first version").unwrap();
    store.create_file(&file, "second").unwrap();
    assert_eq!(fs::read_to_string(&file).unwrap(), "second");
}

#[test]
fn create_file_fails_when_parent_directory_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("missing").join("note.md");
    let store = FsNoteStore::new();

    let err = store.create_file(&file, "content").unwrap_err();
    assert_eq!(err.op, StoreOp::CreateFile);
    assert!(err.to_string().contains("note.md"));
}

#[test]
fn append_to_file_preserves_existing_content_and_creates_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("existing.md");
    let fresh = dir.path().join("fresh.md");
    let store = FsNoteStore::new();

    store.create_file(&existing, "Initial content\n").unwrap();
    store.append_to_file(&existing, "Appended content").unwrap();
    assert_eq!(
        fs::read_to_string(&existing).unwrap(),
        "Initial content\nAppended content"
    );

    store.append_to_file(&fresh, "- only\n").unwrap();
    assert_eq!(fs::read_to_string(&fresh).unwrap(), "- only\n");
}

#[test]
fn append_to_file_fails_for_directory_target() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsNoteStore::new();

    let err = store.append_to_file(dir.path(), "content").unwrap_err();
    assert_eq!(err.op, StoreOp::Append);
}

#[test]
fn last_line_of_returns_final_split_element() {
    let dir = tempfile::tempdir().unwrap();
    let unterminated = dir.path().join("a.md");
    let terminated = dir.path().join("b.md");
    fs::write(&unterminated, "# 2024-03-05\n\n- buy milk").unwrap();
    fs::write(&terminated, "# 2024-03-05\n\n- buy milk\n").unwrap();
    let store = FsNoteStore::new();

    assert_eq!(store.last_line_of(&unterminated).unwrap(), "- buy milk");
    assert_eq!(store.last_line_of(&terminated).unwrap(), "");
    assert_eq!(
        store.trailing_lines_of(&terminated, 2).unwrap(),
        vec!["- buy milk".to_string(), String::new()]
    );
}

#[test]
fn last_line_of_fails_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsNoteStore::new();

    let err = store.last_line_of(&dir.path().join("missing.md")).unwrap_err();
    assert_eq!(err.op, StoreOp::Read);
}

#[test]
fn path_exists_propagates_stat_errors_other_than_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("note.md");
    fs::write(&file, "x").unwrap();
    let store = FsNoteStore::new();

    let err = store.path_exists(&file.join("child")).unwrap_err();

    assert_eq!(err.op, StoreOp::Stat);
    assert_eq!(err.path, file.join("child"));
}

#[test]
fn last_line_of_tolerates_non_utf8_content() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("note.md");
    fs::write(&file, b"# 2024-03-05\n\n- caf\xe9").unwrap();
    let store = FsNoteStore::new();

    assert_eq!(store.last_line_of(&file).unwrap(), "- caf\u{fffd}");
}
