mod common;

use common::{run_ringkas, TestEnv};

#[test]
fn ringkas_help_shows_usage() {
    let output = run_ringkas(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("summarize"));
    assert!(stdout.contains("history"));
}

#[test]
fn ringkas_version_shows_version() {
    let output = run_ringkas(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--version should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("ringkas "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_ringkas(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("ringkas"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_show_works() {
    let output = run_ringkas(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[general]"));
    assert!(stdout.contains("data_dir"));
    assert!(stdout.contains("[content]"));
    assert!(stdout.contains("min_article_chars = 50"));
}

#[test]
fn config_show_redacts_api_key() {
    let env = TestEnv::new();
    let output = env.run_with_env(
        &["config", "show"],
        &[("RINGKAS_GEMINI_API_KEY", "super-secret-key")],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(!stdout.contains("super-secret-key"));
    assert!(stdout.contains("********"));
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_ringkas(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config path should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(first.status.success());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn history_works_with_empty_database() {
    let env = TestEnv::new();
    env.use_local_data_dir();
    let output = env.run(&["history"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "history should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("No summaries found"));
}
