use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

pub fn run_ringkas(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_ringkas"))
            .args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env_remove("RINGKAS_GEMINI_API_KEY")
            .env_remove("GOOGLE_API_KEY")
            .env_remove("RINGKAS_USER")
            .env_remove("RUST_LOG")
            .envs(envs.iter().copied())
            .output()
            .expect("failed to execute ringkas binary")
    }

    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }

    /// Point the data directory at the test's temp dir and return the database path.
    #[allow(dead_code)]
    pub fn use_local_data_dir(&self) -> PathBuf {
        let data_dir = self.data.path().join("ringkas-data");
        self.write_config(&format!(
            "[general]\ndata_dir = {:?}\n",
            data_dir.display().to_string()
        ));
        data_dir.join("ringkas.db")
    }
}
