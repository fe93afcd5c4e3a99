use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// The token survives across processes and `clear` removes it.
#[test]
fn token_round_trips_through_the_session_file() {
    let dir = tempfile::tempdir().unwrap();

    let mut set = cargo_bin_cmd!("kinodeckctl");
    set.env("XDG_CONFIG_HOME", dir.path())
        .args(["auth", "set-token", "tok-123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Token stored."));

    let mut status = cargo_bin_cmd!("kinodeckctl");
    status
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authenticated"));

    let mut clear = cargo_bin_cmd!("kinodeckctl");
    clear
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["auth", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session cleared."));

    let mut status = cargo_bin_cmd!("kinodeckctl");
    status
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No session token stored."));
}

/// `config set-url` persists; the environment outranks the file.
#[test]
fn config_file_and_env_override_order() {
    let dir = tempfile::tempdir().unwrap();

    let mut set = cargo_bin_cmd!("kinodeckctl");
    set.env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set-url", "https://api.kinodeck.dev"])
        .assert()
        .success();

    let mut show = cargo_bin_cmd!("kinodeckctl");
    show.env("XDG_CONFIG_HOME", dir.path())
        .env_remove("KINODECK_API_URL")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.kinodeck.dev"));

    let mut show = cargo_bin_cmd!("kinodeckctl");
    show.env("XDG_CONFIG_HOME", dir.path())
        .env("KINODECK_API_URL", "https://staging.kinodeck.dev")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staging.kinodeck.dev"));
}
