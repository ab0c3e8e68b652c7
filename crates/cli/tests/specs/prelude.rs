//! Shared fixtures for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Server config with one managed user and an unrelated inbound
pub const SERVER_CONFIG: &str = r#"{
  "log": { "level": "warn" },
  "inbounds": [
    {
      "type": "vless",
      "tag": "vless-in",
      "listen_port": 443,
      "users": [
        { "uuid": "11111111-1111-4111-8111-111111111111", "name": "alice", "flow": "xtls-rprx-vision" }
      ]
    },
    { "type": "shadowsocks", "tag": "ss-in", "password": "keep-me" }
  ]
}
"#;

pub const ROSTER: &str = r#"[
  {
    "clientId": "11111111-1111-4111-8111-111111111111",
    "clientName": "alice",
    "creationDate": "Sat Oct 17 09:30:00 2026"
  }
]
"#;

pub const ALICE: &str = "11111111-1111-4111-8111-111111111111";

/// A scratch directory the CLI runs in
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Settings, server config and roster with one client.
    ///
    /// The container runtime is `true`, so checks and restarts succeed
    /// without touching docker.
    pub fn with_clients() -> Self {
        let project = Self::empty();
        project.settings("true");
        project.file("config.json", SERVER_CONFIG);
        project.file("clientsTable.json", ROSTER);
        project
    }

    /// Write settings.toml using `runtime` as the container runtime binary
    pub fn settings(&self, runtime: &str) {
        self.file(
            "settings.toml",
            &format!(
                r#"
config_path = "config.json"
clients_table = "clientsTable.json"
backup_dir = "backup"
container = "sb-test"
docker_command = "{}"
"#,
                runtime
            ),
        );
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }

    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    pub fn json(&self, path: &str) -> Value {
        serde_json::from_str(&self.read(path)).unwrap()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.dir.path().join(path).exists()
    }

    /// Files in the backup directory
    pub fn backups(&self) -> Vec<PathBuf> {
        match fs::read_dir(self.dir.path().join("backup")) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Names in the managed inbound, in order
    pub fn server_names(&self) -> Vec<String> {
        self.json("config.json")["inbounds"][0]["users"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap().to_string())
            .collect()
    }

    /// Names in the roster, in order
    pub fn roster_names(&self) -> Vec<String> {
        self.json("clientsTable.json")
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["clientName"].as_str().unwrap().to_string())
            .collect()
    }

    pub fn sbm(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("sbm").unwrap();
        cmd.current_dir(self.dir.path()).env_remove("RUST_LOG");
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct RunAssert {
    assert: assert_cmd::assert::Assert,
}

impl RunAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(expected)),
        }
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(unexpected).not()),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(expected)),
        }
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stdout_json(&self) -> Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}
