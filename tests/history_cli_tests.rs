mod common;

use anyhow::Result;
use common::TestEnv;

use ringkas::content::SourceKind;
use ringkas::llm::SummaryStyle;
use ringkas::storage::{Database, NewSummary};

fn seed(db: &Database, user: &str, source: &str, text: &str) -> Result<i64> {
    let summary = db.insert_summary(&NewSummary {
        user_id: user.to_string(),
        source_kind: SourceKind::Url,
        style: SummaryStyle::ShortParagraph,
        original_source: source.to_string(),
        processed_text: "processed body".to_string(),
        summary_text: text.to_string(),
    })?;
    Ok(summary.id)
}

#[test]
fn history_lists_only_the_users_summaries() -> Result<()> {
    let env = TestEnv::new();
    let db_path = env.use_local_data_dir();
    std::fs::create_dir_all(db_path.parent().unwrap())?;
    let db = Database::open_path(&db_path)?;
    seed(&db, "alice", "https://example.com/alice", "Alice's summary")?;
    seed(&db, "bob", "https://example.com/bob", "Bob's summary")?;
    drop(db);

    let output = env.run(&["history", "--user", "alice"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr:\n{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("https://example.com/alice"));
    assert!(!stdout.contains("https://example.com/bob"));
    assert!(stdout.contains("Short Paragraph"));

    Ok(())
}

#[test]
fn show_and_delete_respect_ownership() -> Result<()> {
    let env = TestEnv::new();
    let db_path = env.use_local_data_dir();
    std::fs::create_dir_all(db_path.parent().unwrap())?;
    let db = Database::open_path(&db_path)?;
    let id = seed(&db, "alice", "https://example.com/post", "The gist of it.")?.to_string();
    drop(db);

    let shown = env.run(&["show", &id, "--user", "alice"]);
    assert!(shown.status.success());
    assert!(String::from_utf8_lossy(&shown.stdout).contains("The gist of it."));

    let forbidden = env.run(&["delete", &id, "--user", "bob"]);
    assert!(!forbidden.status.success());
    assert!(String::from_utf8_lossy(&forbidden.stderr)
        .contains("You do not have permission to access this summary."));

    let deleted = env.run_with_env(&["delete", &id], &[("RINGKAS_USER", "alice")]);
    assert!(
        deleted.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&deleted.stderr)
    );
    assert!(String::from_utf8_lossy(&deleted.stdout).contains(&format!("Summary {} deleted", id)));

    let again = env.run(&["delete", &id, "--user", "alice"]);
    assert!(!again.status.success());
    assert!(String::from_utf8_lossy(&again.stderr).contains("Summary not found."));

    Ok(())
}

#[test]
fn show_json_is_machine_readable() -> Result<()> {
    let env = TestEnv::new();
    let db_path = env.use_local_data_dir();
    std::fs::create_dir_all(db_path.parent().unwrap())?;
    let db = Database::open_path(&db_path)?;
    let id = seed(&db, "local", "https://example.com/json", "JSON summary")?.to_string();
    drop(db);

    let output = env.run(&["show", &id, "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["summary_text"], "JSON summary");
    assert_eq!(value["source_kind"], "url");
    assert_eq!(value["style"], "short_paragraph");

    Ok(())
}

#[test]
fn storage_failures_show_the_generic_message() -> Result<()> {
    let env = TestEnv::new();
    let scratch = tempfile::tempdir()?;
    let blocker = scratch.path().join("plain-file");
    std::fs::write(&blocker, "not a directory")?;
    env.write_config(&format!(
        "[general]\ndata_dir = {:?}\n",
        blocker.join("data").display().to_string()
    ));

    for args in [
        vec!["history"],
        vec!["show", "1"],
        vec!["delete", "1"],
        vec!["summarize", "Long enough text to get past validation."],
    ] {
        let output = env.run(&args);
        assert!(!output.status.success(), "{args:?} should fail");

        let stderr = String::from_utf8_lossy(&output.stderr);
        let error_line = stderr
            .lines()
            .find(|line| line.starts_with("Error:"))
            .unwrap_or_default();
        assert_eq!(
            error_line,
            format!("Error: {}", ringkas::GENERIC_FAILURE_MESSAGE),
            "{args:?} stderr:\n{stderr}"
        );

        let quiet = env.run_with_env(&args, &[("RUST_LOG", "off")]);
        let quiet_stderr = String::from_utf8_lossy(&quiet.stderr);
        assert!(!quiet_stderr.contains("Not a directory"), "{quiet_stderr}");
        assert!(!quiet_stderr.contains("plain-file"), "{quiet_stderr}");
    }

    Ok(())
}
