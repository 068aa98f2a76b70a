// crates/coinage-cli/tests/cli_lifecycle.rs
//
// Drives the `coinage` binary through a full issue-delegate-mint-transfer-burn
// lifecycle against a throwaway snapshot file.

use std::path::PathBuf;
use std::process::{Command, Output};

struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    fn new(label: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("coinage_cli_{}_{}", label, uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn run(&self, caller: &str, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_coinage"))
            .arg("--config")
            .arg(self.dir.join("missing.toml"))
            .arg("--state")
            .arg(self.dir.join("ledger.json"))
            .arg("--caller")
            .arg(caller)
            .args(args)
            .env("RUST_LOG", "off")
            .output()
            .unwrap()
    }

    fn ok(&self, caller: &str, args: &[&str]) -> String {
        let out = self.run(caller, args);
        assert!(
            out.status.success(),
            "coinage {:?} failed: {}",
            args,
            String::from_utf8_lossy(&out.stderr)
        );
        String::from_utf8(out.stdout).unwrap()
    }

    fn balance(&self, account: &str, token: &str) -> u64 {
        let stdout = self.ok(
            account,
            &["--json", "account", "balance", "--token", token],
        );
        let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        rows[0]["balance"].as_u64().unwrap()
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn full_lifecycle_through_cli() {
    let ws = Workspace::new("lifecycle");

    ws.ok("issuer", &["token", "init", "--decimals", "6"]);
    ws.ok("minter", &["minter", "init"]);
    ws.ok("alice", &["account", "init"]);
    ws.ok("bob", &["account", "init"]);
    ws.ok("issuer", &["token", "grant", "--minter", "minter", "--amount", "100"]);

    ws.ok("minter", &["minter", "mint", "--token", "issuer", "--to", "alice", "--amount", "100"]);
    assert_eq!(ws.balance("alice", "issuer"), 100);
    assert_eq!(ws.balance("bob", "issuer"), 0);

    ws.ok("alice", &["account", "transfer", "--token", "issuer", "--to", "bob", "--amount", "100"]);
    assert_eq!(ws.balance("alice", "issuer"), 0);
    assert_eq!(ws.balance("bob", "issuer"), 100);

    ws.ok("bob", &["account", "burn", "--token", "issuer", "--amount", "100"]);
    assert_eq!(ws.balance("bob", "issuer"), 0);

    let audit = ws.ok("anyone", &["token", "audit", "--token", "issuer"]);
    assert!(audit.contains("Supply audit passed: 0 units"));
}

#[test]
fn rejected_operation_does_not_persist() {
    let ws = Workspace::new("rejected");

    ws.ok("issuer", &["token", "init"]);
    ws.ok("minter", &["minter", "init"]);
    ws.ok("alice", &["account", "init"]);
    ws.ok("issuer", &["token", "grant", "--minter", "minter", "--amount", "5"]);

    let over = ws.run("minter", &["minter", "mint", "--token", "issuer", "--to", "alice", "--amount", "6"]);
    assert!(!over.status.success());
    assert_eq!(ws.balance("alice", "issuer"), 0);

    ws.ok("issuer", &["token", "drop-progenitor"]);
    let regrant = ws.run("issuer", &["token", "grant", "--minter", "minter", "--amount", "50"]);
    assert!(!regrant.status.success());

    // The allowance granted before the drop is still usable.
    ws.ok("minter", &["minter", "mint", "--token", "issuer", "--to", "alice", "--amount", "5"]);
    assert_eq!(ws.balance("alice", "issuer"), 5);
}
