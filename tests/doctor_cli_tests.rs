mod common;

use common::TestEnv;

#[test]
fn doctor_subcommand_is_available() {
    let output = TestEnv::new().run(&["doctor", "--help"]);

    assert!(
        output.status.success(),
        "doctor --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn doctor_reports_missing_api_key() {
    let env = TestEnv::new();
    env.use_local_data_dir();
    let output = env.run(&["doctor", "--json"]);

    assert!(
        output.status.success(),
        "doctor should run successfully\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("doctor --json prints JSON");
    let checks = report["checks"].as_array().expect("checks array");
    let llm = checks
        .iter()
        .find(|c| c["name"] == "llm")
        .expect("llm check present");
    assert_eq!(llm["status"], "missing");

    let database = checks
        .iter()
        .find(|c| c["name"] == "database")
        .expect("database check present");
    assert_eq!(database["status"], "ok");
}
