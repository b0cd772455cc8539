//! End-to-end persistence: everything a session changes survives a restart.

use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

use whatnext::config::{Config, DEFAULT_STORE_NAME};
use whatnext::model::ThemeMode;
use whatnext::session::Session;
use whatnext::store::{keys, PrefStore};

fn reopen(config: &Config) -> Session {
    Session::open_with_rng(config, StdRng::seed_from_u64(99))
}

#[test]
fn test_session_round_trip() {
    let dir = tempdir().unwrap();
    let config = Config::with_dir(dir.path());

    let drawn = {
        let mut session = reopen(&config);
        session.add_suggestion("Write a letter").unwrap();
        let drawn = session.draw_suggestion().unwrap().suggestion;
        session.toggle_favorite();
        session.apply_theme(ThemeMode::Light);
        session.apply_theme(ThemeMode::Custom);
        session.toggle_custom_dark();
        drawn
    };

    let session = reopen(&config);
    assert!(session.book().suggestions().iter().any(|s| s == "Write a letter"));
    assert_eq!(session.book().count_for(&drawn), 1);
    assert!(session.favorites().contains(&drawn));
    assert_eq!(session.theme().mode(), ThemeMode::Custom);
    assert!(session.theme().is_dark());
    assert!(session.book().last_usage() > 0);
}

#[test]
fn test_emptied_list_stays_empty() {
    let dir = tempdir().unwrap();
    let config = Config::with_dir(dir.path());

    {
        let mut session = reopen(&config);
        while session.remove_suggestion(0).is_some() {}
    }

    // Defaults are only seeded on first run
    let session = reopen(&config);
    assert!(session.book().is_empty());
    assert_eq!(session.book().categories().len(), 4);
}

#[test]
fn test_corrupt_store_starts_fresh() {
    let dir = tempdir().unwrap();
    let config = Config::with_dir(dir.path());
    let path = dir.path().join(format!("{}.json", DEFAULT_STORE_NAME));
    fs::write(&path, "{ this is not json").unwrap();

    let session = reopen(&config);
    assert_eq!(session.book().len(), 16);
    assert_eq!(session.theme().mode(), ThemeMode::System);
}

#[test]
fn test_malformed_values_are_ignored() {
    let dir = tempdir().unwrap();
    let config = Config::with_dir(dir.path());

    let mut store = PrefStore::open(dir.path(), DEFAULT_STORE_NAME);
    store
        .edit()
        .put_string(keys::SUGGESTIONS, r#"{"suggestions":["Swim",7,"Nap"]}"#)
        .put_string(keys::COUNTS, "[1,2,3]")
        .put_string(keys::CATEGORIES, "garbage")
        .put_string(keys::THEME, "neon")
        .apply()
        .unwrap();

    let session = reopen(&config);
    assert_eq!(session.book().suggestions(), ["Swim", "Nap"]);
    assert_eq!(session.book().total_draws(), 0);
    assert_eq!(session.book().categories().len(), 4);
    assert_eq!(session.theme().mode(), ThemeMode::System);
}

#[test]
fn test_foreign_value_keeps_user_list() {
    let dir = tempdir().unwrap();
    let config = Config::with_dir(dir.path());
    let path = dir.path().join(format!("{}.json", DEFAULT_STORE_NAME));
    fs::write(
        &path,
        r#"{"suggestions":"{\"suggestions\":[\"Knit\"]}","theme":"dark","lastUsage":1.5}"#,
    )
    .unwrap();

    let mut session = reopen(&config);
    assert_eq!(session.book().suggestions(), ["Knit"]);
    assert_eq!(session.theme().mode(), ThemeMode::Dark);

    session.draw_suggestion().unwrap();
    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("Knit"));
    assert!(!on_disk.contains("Watch a movie"));
}
