//!
//! # Test Common Utilities
//!
//! Helpers for running the `whispervault` binary in an isolated environment: every
//! test gets its own config file in a temporary directory and a server URL nothing
//! listens on, so no test depends on a running service.
//!
//
// // # 测试通用工具
// //
// // 每个测试使用临时目录中的独立配置文件，以及一个无人监听的服务地址，
// // 因此测试不依赖真实的服务。
// //
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

/// A port on which no service runs. Port 9 (discard) is closed on test machines.
pub const UNREACHABLE_SERVER: &str = "http://127.0.0.1:9/api";

/// Represents the context for a single test.
pub struct TestContext {
    /// Held for its Drop behavior to ensure cleanup.
    pub _temp_dir: TempDir,
    /// The config file used by every command of this context.
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.json");
        Ok(TestContext {
            _temp_dir: temp_dir,
            config_path,
        })
    }

    /// Writes a config file with the given JSON content.
    pub fn write_config(&self, json: &str) -> anyhow::Result<()> {
        std::fs::write(&self.config_path, json)?;
        Ok(())
    }

    /// A command preconfigured with this context's config file and a clean environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_whispervault"));
        cmd.arg("--config")
            .arg(&self.config_path)
            .env_remove("WHISPERVAULT_SERVER_URL")
            .env_remove("WHISPERVAULT_TOKEN");
        cmd
    }

    /// `open` against the unreachable server, feeding `input` to the REPL.
    pub fn open_offline(&self, input: &str) -> assert_cmd::assert::Assert {
        self.command()
            .arg("--server")
            .arg(UNREACHABLE_SERVER)
            .arg("open")
            .write_stdin(input.to_string())
            .assert()
    }
}
