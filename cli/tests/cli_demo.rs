use std::process::Command;

fn run_labyrinth(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_labyrinth"))
        .args(args)
        .env("RUST_LOG", "off")
        .env_remove("LOG_FILE")
        .env_remove("LABYRINTH_URL")
        .env_remove("LABYRINTH_MAZE")
        .env_remove("LABYRINTH_MAX_MOVES")
        .output()
        .expect("failed to run labyrinth binary")
}

#[test]
fn cli_help_succeeds() {
    let out = run_labyrinth(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--demo"));
    assert!(stdout.contains("--dump-graph"));
}

#[test]
fn cli_demo_text_report() {
    let out = run_labyrinth(&["--demo"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("solved in "));
    assert!(stdout.contains("The Gate"));
}

#[test]
fn cli_demo_json_report_with_graph() {
    let out = run_labyrinth(&["--demo", "--json", "--dump-graph"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["report"]["outcome"], "solved");
    assert_eq!(value["report"]["end"]["id"], "gate");
    assert!(value["graph"]["locations"]["start"].is_object());
}

#[test]
fn cli_demo_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    let out = run_labyrinth(&["--demo", "--json", "--file", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["report"]["outcome"], "solved");
}

#[test]
fn cli_move_budget_exhausted_fails() {
    let out = run_labyrinth(&["--demo", "--max-moves", "1"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("move budget"));
}

#[test]
fn cli_unreachable_server_fails() {
    let out = run_labyrinth(&["--url", "ws://127.0.0.1:1", "m1"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("session:"));
}
