use chrono::NaiveDate;
use daynote_core::NotesLocation;
use std::path::PathBuf;

fn march_fifth() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

#[test]
fn resolve_builds_year_month_tree_paths() {
    let location = NotesLocation::resolve("/tmp/x", march_fifth());

    assert_eq!(location.root_directory, PathBuf::from("/tmp/x"));
    assert_eq!(location.year_month_directory, PathBuf::from("/tmp/x/2024/03"));
    assert_eq!(location.note_file_name, "2024-03-05.md");
    assert_eq!(
        location.note_file_path,
        PathBuf::from("/tmp/x/2024/03/2024-03-05.md")
    );
    assert_eq!(location.formatted.full, "2024-03-05");
}

#[test]
fn resolve_is_deterministic() {
    let first = NotesLocation::resolve("/srv/notes", march_fifth());
    let second = NotesLocation::resolve("/srv/notes", march_fifth());
    assert_eq!(first, second);
}

#[test]
fn note_file_sits_inside_year_month_directory() {
    for (y, m, d) in [(1999, 1, 1), (2024, 2, 29), (2030, 10, 31)] {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let location = NotesLocation::resolve("/notes", date);
        assert_eq!(
            location.note_file_path.parent(),
            Some(location.year_month_directory.as_path())
        );
        assert_eq!(
            location.note_file_path.file_name().unwrap().to_str().unwrap(),
            format!("{}.md", date.format("%Y-%m-%d"))
        );
        assert_eq!(
            location.year_month_directory.parent().unwrap(),
            location.root_directory.join(&location.formatted.year)
        );
    }
}

#[test]
fn for_today_uses_local_date() {
    let location = NotesLocation::for_today("/notes");
    let today = chrono::Local::now().date_naive();
    // Tolerate a midnight rollover between the two clock reads.
    assert!(location.date == today || location.date.succ_opt() == Some(today));
}
