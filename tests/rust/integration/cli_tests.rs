use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::json;

const STATE: &str = r#"{
    "nodes": [
        { "id": "node-1", "label": "Person", "alias": "n" },
        { "id": "node-2", "label": "Person", "alias": "a" }
    ],
    "relationships": [
        { "id": "rel-3", "type": "KNOWS", "from": "node-1", "to": "node-2" }
    ],
    "conditions": [
        { "id": "cond-4", "type": "property", "nodeId": "node-1",
          "property": "age", "operator": ">", "value": "30" }
    ],
    "limit": "10"
}"#;

fn cypher_studio(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cypher-studio"));
    command
        .current_dir(dir)
        .env_remove("CYPHER_STUDIO_MULTILINE")
        .env_remove("CYPHER_STUDIO_MAX_ALIAS_PROBES")
        .env_remove("CYPHER_STUDIO_FALLBACK_ALIAS")
        .env_remove("RUST_LOG");
    command
}

fn write_state(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("state.json");
    std::fs::write(&path, STATE).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_compile_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_state(dir.path());

    let output = cypher_studio(dir.path())
        .arg("compile")
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(
        stdout(&output),
        "MATCH (n:Person)-[r1:KNOWS]->(a:Person) WHERE toInteger(n.age) > 30 RETURN n, a LIMIT 10\n"
    );
}

#[test]
fn test_compile_from_stdin_multiline() {
    let dir = tempfile::tempdir().unwrap();

    let mut child = cypher_studio(dir.path())
        .args(["compile", "--multiline"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(STATE.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(
        stdout(&output),
        "MATCH (n:Person)-[r1:KNOWS]->(a:Person)\nWHERE toInteger(n.age) > 30\nRETURN n, a\nLIMIT 10\n"
    );
}

#[test]
fn test_update_command() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_state(dir.path());
    let values = json!({ "name": "Bob", "age": 31 }).to_string();

    let output = cypher_studio(dir.path())
        .args(["update", "--target", "a", "--values", &values])
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(
        stdout(&output),
        "MATCH (n:Person)-[r1:KNOWS]->(a:Person) WHERE toInteger(n.age) > 30 SET a.name = \"Bob\", a.age = 31 RETURN a\n"
    );
}

#[test]
fn test_update_unknown_target_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_state(dir.path());

    let output = cypher_studio(dir.path())
        .args(["update", "--target", "x", "--values", "{}"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Alias 'x' is not bound"), "{}", stderr);
}

#[test]
fn test_values_must_be_an_object() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_state(dir.path());

    let output = cypher_studio(dir.path())
        .args(["update", "--target", "a", "--values", "[1, 2]"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--values must be a JSON object"));
}

#[test]
fn test_config_file_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("compiler.yaml");
    std::fs::write(&config, "fallback_alias: row\n").unwrap();
    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "{}").unwrap();

    let from_file = cypher_studio(dir.path())
        .arg("compile")
        .arg("--config")
        .arg(&config)
        .arg(&empty)
        .output()
        .unwrap();
    assert_eq!(stdout(&from_file), "MATCH (row) RETURN row\n");

    let overridden = cypher_studio(dir.path())
        .arg("compile")
        .arg("--config")
        .arg(&config)
        .args(["--fallback-alias", "x"])
        .arg(&empty)
        .output()
        .unwrap();
    assert_eq!(stdout(&overridden), "MATCH (x) RETURN x\n");
}

#[test]
fn test_dotenv_file_controls_logging() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_state(dir.path());
    std::fs::write(dir.path().join(".env"), "RUST_LOG=debug\n").unwrap();

    let output = cypher_studio(dir.path())
        .arg("compile")
        .arg(&input)
        .output()
        .unwrap();

    stdout(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("compiled query"), "{}", stderr);
}

#[test]
fn test_invalid_probe_budget_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_state(dir.path());

    let output = cypher_studio(dir.path())
        .args(["compile", "--max-alias-probes", "0"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid command line configuration"));
}
