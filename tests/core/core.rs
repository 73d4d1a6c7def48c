use ezjump::core::actions::{self, Context};
use ezjump::core::config::Settings;
use ezjump::core::error::EzjumpError;
use ezjump::core::guess;
use ezjump::core::resolver::{self, Query};
use ezjump::core::similarity::similarity;
use ezjump::core::store::{self, PathStore};
use std::fs;
use tempfile::tempdir;

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn context(cwd: &str, max_paths: usize) -> Context {
    Context {
        cwd: cwd.to_string(),
        home: None,
        settings: Settings {
            max_paths,
            ..Settings::default()
        },
    }
}

#[test]
fn similarity_properties_hold() {
    let words = ["music", "Movies", "documents", "x", "src-tauri", "a/b/c"];
    for a in words {
        assert_eq!(similarity(a, a), 1.0);
        for b in words {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s));
        }
    }
    let (a, b) = ("downloads".to_lowercase(), "DOWNLOADS".to_lowercase());
    assert_eq!(similarity(&a, &b), similarity(&b, &a));
}

#[test]
fn save_then_load_round_trips_in_order() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("paths.txt");
    let entries = list(&["/home/u/music", "/var/log", "/opt/tools"]);

    store::save(&file, &entries, 250).expect("save");
    assert_eq!(store::load(&file).expect("load"), entries);
}

#[test]
fn save_then_load_truncates_to_capacity() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("paths.txt");
    let entries: Vec<String> = (0..12).map(|i| format!("/d/{}", i)).collect();

    store::save(&file, &entries, 5).expect("save");
    assert_eq!(store::load(&file).expect("load"), entries[..5].to_vec());
}

#[test]
fn remembering_past_capacity_evicts_oldest_first() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("paths.txt");
    let max_paths = 4;

    for i in 0..=max_paths {
        let mut store = PathStore::open(&file, max_paths).expect("open");
        actions::remember(&mut store, &context(&format!("/dir/{}", i), max_paths))
            .expect("remember");
    }

    let stored = store::load(&file).expect("load");
    assert_eq!(stored.len(), max_paths);
    assert_eq!(stored, list(&["/dir/4", "/dir/3", "/dir/2", "/dir/1"]));
}

#[test]
fn forget_subtree_preserves_relative_order() {
    let entries = list(&["/z", "/p", "/p/q", "/a", "/p/q/r", "/pq", "/b"]);
    assert_eq!(
        store::forget(&entries, "/p", true),
        list(&["/z", "/a", "/pq", "/b"])
    );
}

#[test]
fn absolute_keyword_never_consults_store() {
    let entries = list(&["/home/u/music"]);
    let query = Query {
        keyword: "/srv/data///",
        cwd: "/",
        min_accuracy: 0.7,
    };
    assert_eq!(resolver::resolve(&entries, &query).as_deref(), Some("/srv/data"));
    assert_eq!(resolver::resolve(&[], &query).as_deref(), Some("/srv/data"));
}

#[test]
fn jump_resolves_music_from_store() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("paths.txt");
    fs::write(&file, "/home/u/music\n/home/u/movies\n/var/log").expect("seed");

    let mut store = PathStore::open(&file, 250).expect("open");
    let hit = actions::jump(&mut store, &context("/var/log", 250), "music").expect("jump");
    assert_eq!(hit.as_deref(), Some("/home/u/music"));
    assert_eq!(store.entries()[0], "/home/u/music");
}

#[test]
fn empty_store_falls_back_to_case_corrected_directory() {
    let tmp = tempdir().expect("tempdir");
    let base = tmp.path().join("base");
    fs::create_dir_all(base.join("Docs")).expect("mkdir");
    let file = tmp.path().join("paths.txt");

    assert_eq!(guess::guess(&base, None, "docs"), Some(base.join("Docs")));

    let mut store = PathStore::open(&file, 250).expect("open");
    let cwd = base.to_string_lossy().into_owned();
    let hit = actions::jump(&mut store, &context(&cwd, 250), "docs").expect("jump");
    let expected = base.join("Docs").to_string_lossy().into_owned();
    assert_eq!(hit.as_deref(), Some(expected.as_str()));
    assert_eq!(store::load(&file).expect("load"), vec![expected]);
}

#[test]
fn jump_skips_current_directory_for_an_alternative() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("paths.txt");
    fs::write(&file, "/home/u/notes\n/mnt/archive/notes").expect("seed");

    let mut store = PathStore::open(&file, 250).expect("open");
    let hit = actions::jump(&mut store, &context("/home/u/notes", 250), "notes").expect("jump");
    assert_eq!(hit.as_deref(), Some("/mnt/archive/notes"));
}

#[test]
fn unreadable_store_is_fatal() {
    let tmp = tempdir().expect("tempdir");
    let err = PathStore::open(tmp.path(), 250).expect_err("directory is not a store");
    assert!(matches!(err, EzjumpError::Storage { .. }));
}

#[test]
fn failed_save_is_fatal_and_keeps_old_contents() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("paths.txt");
    fs::write(&file, "/keep").expect("seed");
    // a directory squatting on the temp name makes the write fail
    fs::create_dir(tmp.path().join(".paths.txt.tmp")).expect("mkdir");

    let err = store::save(&file, &list(&["/new"]), 10).expect_err("write must fail");
    assert!(matches!(err, EzjumpError::Storage { .. }));
    assert_eq!(fs::read_to_string(&file).expect("read"), "/keep");
}

#[test]
fn multi_keyword_shortlist_from_store() {
    let entries = list(&[
        "/home/u/work/api/src",
        "/home/u/work/web/src",
        "/home/u/play/src",
    ]);
    assert_eq!(
        resolver::shortlist(&entries, "work src", 10),
        list(&["/home/u/work/api/src", "/home/u/work/web/src"])
    );
    assert_eq!(
        resolver::shortlist(&entries, "work src", 1),
        list(&["/home/u/work/api/src"])
    );
}
