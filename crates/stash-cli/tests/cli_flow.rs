use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stash"))
}

/// Temp home with a keyfile-backed config, so no test touches the OS keychain.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = format!(
            "[store]\npath = \"{}\"\n\n[key]\nsource = \"keyfile\"\npath = \"{}\"\n",
            dir.path().join("data").join("stash.bin").display(),
            dir.path().join("stash.key").display(),
        );
        std::fs::write(dir.path().join("config.toml"), config).expect("write config");
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn store_path(&self) -> PathBuf {
        self.root().join("data").join("stash.bin")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(bin())
            .args(args)
            .env("STASH_CONFIG", self.root().join("config.toml"))
            .env("XDG_CONFIG_HOME", self.root().join("xdg-config"))
            .env("XDG_DATA_HOME", self.root().join("xdg-data"))
            .env_remove("STASH_PATH")
            .output()
            .expect("run stash")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "stash {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("utf8 stdout")
    }

    fn add_quiet(&self, args: &[&str]) -> String {
        let mut full = vec!["add"];
        full.extend_from_slice(args);
        full.push("-q");
        self.run_ok(&full).trim().to_string()
    }
}

#[test]
fn add_list_show_delete_flow() {
    let sandbox = Sandbox::new();

    let note = sandbox.add_quiet(&["text", "meeting notes"]);
    let link = sandbox.add_quiet(&["link", "--alias", "docs", "https://example.com/meet"]);
    let password = sandbox.add_quiet(&["password", "--alias", "email", "--secret", "hunter2"]);

    let listed = sandbox.run_ok(&["list", "--json"]);
    let values: Vec<serde_json::Value> = serde_json::from_str(&listed).expect("json list");
    let ids: Vec<&str> = values.iter().map(|v| v["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![password.as_str(), link.as_str(), note.as_str()]);
    assert!(!listed.contains("hunter2"));

    let shown = sandbox.run_ok(&["show", &password, "--json"]);
    let value: serde_json::Value = serde_json::from_str(&shown).expect("json show");
    assert_eq!(value["secret"], "hunter2");
    assert_eq!(value["alias"], "email");

    // Unique 8-character prefix
    let shown = sandbox.run_ok(&["show", &note[..8], "-q"]);
    assert_eq!(shown.trim(), "meeting notes");

    sandbox.run_ok(&["delete", &link]);
    let listed = sandbox.run_ok(&["list", "--json"]);
    let values: Vec<serde_json::Value> = serde_json::from_str(&listed).expect("json list");
    assert_eq!(values.len(), 2);
    assert!(!listed.contains(&link));
}

#[test]
fn list_filters_by_query_and_kind() {
    let sandbox = Sandbox::new();
    sandbox.add_quiet(&["text", "Buy milk"]);
    sandbox.add_quiet(&["link", "--alias", "Milk recipes", "https://example.com"]);
    sandbox.add_quiet(&["text", "call mom"]);

    let listed = sandbox.run_ok(&["list", "--query", "MILK", "--json"]);
    let values: Vec<serde_json::Value> = serde_json::from_str(&listed).expect("json list");
    let kinds: Vec<&str> = values.iter().map(|v| v["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["link", "text"]);

    let listed = sandbox.run_ok(&["list", "--query", "milk", "--kind", "text", "--json"]);
    let values: Vec<serde_json::Value> = serde_json::from_str(&listed).expect("json list");
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["content"], "Buy milk");
}

#[test]
fn records_persist_encrypted_across_processes() {
    let sandbox = Sandbox::new();
    sandbox.add_quiet(&["text", "plaintext canary"]);

    let raw = std::fs::read(sandbox.store_path()).expect("store file");
    assert!(!String::from_utf8_lossy(&raw).contains("plaintext canary"));

    let listed = sandbox.run_ok(&["list", "-q"]);
    assert!(listed.contains("plaintext canary"));
}

#[test]
fn image_round_trip_via_output_file() {
    let sandbox = Sandbox::new();
    let input = sandbox.root().join("pixel.png");
    let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3, 255];
    std::fs::write(&input, &bytes).expect("write image");

    let id = sandbox.add_quiet(&["image", "--alias", "pixel", input.to_str().unwrap()]);
    let out = sandbox.root().join("copy.png");
    sandbox.run_ok(&["show", &id, "--output", out.to_str().unwrap()]);

    assert_eq!(std::fs::read(&out).expect("read copy"), bytes);
}

#[test]
fn blank_record_is_rejected_with_invalid_input() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["add", "text", "   "]);
    assert_eq!(output.status.code(), Some(4));

    let output = sandbox.run(&["add", "link", "--alias", "", "https://example.com"]);
    assert_eq!(output.status.code(), Some(4));

    let listed = sandbox.run_ok(&["list", "--json"]);
    let values: Vec<serde_json::Value> = serde_json::from_str(&listed).expect("json list");
    assert!(values.is_empty());
}

#[test]
fn unknown_id_exits_not_found() {
    let sandbox = Sandbox::new();
    sandbox.add_quiet(&["text", "keep me"]);

    let output = sandbox.run(&["delete", "00000000-0000-4000-8000-000000000000"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stash list"));

    let output = sandbox.run(&["show", "abc"]);
    assert_eq!(output.status.code(), Some(4));
}

fn corrupt_files(sandbox: &Sandbox) -> usize {
    std::fs::read_dir(sandbox.root().join("data"))
        .expect("read data dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".corrupt-"))
        .count()
}

#[test]
fn corrupt_store_is_moved_aside_only_on_write() {
    let sandbox = Sandbox::new();
    sandbox.add_quiet(&["text", "soon unreadable"]);
    std::fs::write(sandbox.store_path(), b"not a sealed store").expect("corrupt store");

    let listed = sandbox.run_ok(&["list", "--json"]);
    let values: Vec<serde_json::Value> = serde_json::from_str(&listed).expect("json list");
    assert!(values.is_empty());
    sandbox.run_ok(&["path"]);
    assert_eq!(corrupt_files(&sandbox), 0);
    assert_eq!(
        std::fs::read(sandbox.store_path()).expect("store file"),
        b"not a sealed store"
    );

    sandbox.add_quiet(&["text", "fresh start"]);
    assert_eq!(corrupt_files(&sandbox), 1);
    let listed = sandbox.run_ok(&["list", "-q"]);
    assert!(listed.contains("fresh start"));
}

#[test]
fn zero_retention_cap_is_invalid_input() {
    let sandbox = Sandbox::new();
    let config_path = sandbox.root().join("config.toml");
    let mut config = std::fs::read_to_string(&config_path).expect("read config");
    config.push_str("\n[retention]\nmax_images = 0\n");
    std::fs::write(&config_path, config).expect("write config");

    let input = sandbox.root().join("pixel.png");
    std::fs::write(&input, [1u8, 2, 3]).expect("write image");
    let output = sandbox.run(&["add", "image", "--alias", "pixel", input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_images"));
    assert!(!sandbox.store_path().exists());
}

#[test]
fn path_reports_locations() {
    let sandbox = Sandbox::new();
    let output = sandbox.run_ok(&["path"]);
    assert!(output.contains("stash.bin"));
    assert!(output.contains("keyfile"));

    let quiet = sandbox.run_ok(&["path", "-q"]);
    assert_eq!(PathBuf::from(quiet.trim()), sandbox.store_path());
}

#[test]
fn completions_generate_script() {
    let sandbox = Sandbox::new();
    let output = sandbox.run_ok(&["completions", "bash"]);
    assert!(output.contains("stash"));
}
