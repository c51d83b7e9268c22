use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

const LOG: &str = ".claude/code-review/event-log.jsonl";
const SETTINGS: &str = ".claude/settings.json";

/// Run review-gate inside `dir`, isolated from the host environment.
fn review_gate(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("review-gate");
    cmd.current_dir(dir.path())
        .env_remove("CLAUDE_PROJECT_DIR")
        .env_remove("CLAUDE_PLUGIN_ROOT")
        .env_remove("REVIEW_GATE_LOG");
    cmd
}

fn tool_event(session: &str, tool: &str, file: &str) -> String {
    format!(
        r#"{{"session_id":"{session}","tool_name":"{tool}","tool_input":{{"file_path":"{file}"}}}}"#
    )
}

fn track(dir: &assert_fs::TempDir, tool: &str, file: &str) {
    review_gate(dir)
        .arg("track")
        .write_stdin(tool_event("s1", tool, file))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

fn check(dir: &assert_fs::TempDir) -> assert_cmd::assert::Assert {
    review_gate(dir)
        .arg("check")
        .write_stdin(r#"{"session_id":"s1"}"#)
        .assert()
}

fn log_lines(dir: &assert_fs::TempDir) -> Vec<serde_json::Value> {
    std::fs::read_to_string(dir.path().join(LOG))
        .unwrap_or_default()
        .lines()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect()
}

fn modified(file: &str) -> String {
    format!(r#"{{"event":"file_modified","timestamp":"2026-05-01T10:00:00Z","file":"{file}","tool":"Edit"}}"#)
}

fn marker(files: &[&str]) -> String {
    format!(
        r#"{{"event":"review_triggered","timestamp":"2026-05-01T10:05:00Z","files":{}}}"#,
        serde_json::to_string(files).unwrap()
    )
}

// ─── track ───────────────────────────────────────────────────────

#[test]
fn track_records_tracked_edit() {
    let dir = assert_fs::TempDir::new().unwrap();

    track(&dir, "Edit", "src/app.py");

    let lines = log_lines(&dir);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["event"], "file_modified");
    assert_eq!(lines[0]["file"], "src/app.py");
    assert_eq!(lines[0]["tool"], "Edit");
    let stamp = lines[0]["timestamp"].as_str().unwrap();
    assert!(stamp.ends_with('Z') && stamp.len() == 20, "{stamp}");
}

#[test]
fn track_creates_default_settings_on_first_run() {
    let dir = assert_fs::TempDir::new().unwrap();

    track(&dir, "Write", "main.go");

    dir.child(SETTINGS)
        .assert(predicate::str::contains("\"codeReview\""))
        .assert(predicate::str::contains("\"fileExtensions\""));
}

#[test]
fn track_ignores_untracked_extension() {
    let dir = assert_fs::TempDir::new().unwrap();

    track(&dir, "Write", "docs/notes.md");

    dir.child(LOG).assert(predicate::path::missing());
}

#[test]
fn track_ignores_read_only_tools() {
    let dir = assert_fs::TempDir::new().unwrap();

    track(&dir, "Read", "src/app.py");
    track(&dir, "Bash", "src/app.py");

    dir.child(LOG).assert(predicate::path::missing());
}

#[test]
fn track_without_session_is_silent() {
    let dir = assert_fs::TempDir::new().unwrap();

    review_gate(&dir)
        .arg("track")
        .write_stdin(r#"{"tool_name":"Write","tool_input":{"file_path":"a.py"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    dir.child(".claude").assert(predicate::path::missing());
}

#[test]
fn track_tolerates_garbage_input() {
    let dir = assert_fs::TempDir::new().unwrap();

    review_gate(&dir)
        .arg("track")
        .write_stdin("this is not json")
        .assert()
        .success();
}

#[test]
fn track_respects_disabled_settings() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(SETTINGS)
        .write_str(r#"{"codeReview":{"enabled":false}}"#)
        .unwrap();

    track(&dir, "Write", "src/app.py");

    dir.child(LOG).assert(predicate::path::missing());
}

#[test]
fn track_uses_configured_extensions() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(SETTINGS)
        .write_str(r#"{"codeReview":{"fileExtensions":[".md"]}}"#)
        .unwrap();

    track(&dir, "Write", "src/app.py");
    track(&dir, "Write", "README.md");

    let lines = log_lines(&dir);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["file"], "README.md");
}

#[test]
fn track_never_fails_when_log_is_unwritable() {
    let dir = assert_fs::TempDir::new().unwrap();
    // A file where the log directory belongs.
    dir.child(".claude/code-review").write_str("").unwrap();

    review_gate(&dir)
        .arg("track")
        .write_stdin(tool_event("s1", "Write", "a.py"))
        .assert()
        .success();
}

// ─── check ───────────────────────────────────────────────────────

#[test]
fn check_reports_files_since_last_marker() {
    let dir = assert_fs::TempDir::new().unwrap();
    let log = [
        modified("a.py"),
        modified("b.py"),
        marker(&["a.py", "b.py"]),
        modified("a.py"),
        modified("c.py"),
    ]
    .join("\n");
    dir.child(LOG).write_str(&format!("{log}\n")).unwrap();

    check(&dir)
        .code(2)
        .stdout("a.py\nc.py\n")
        .stderr(predicate::str::contains("code-review agent"))
        .stderr(predicate::str::contains("- a.py\n- c.py\n"));

    let lines = log_lines(&dir);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[5]["event"], "review_triggered");
    assert_eq!(lines[5]["files"], serde_json::json!(["a.py", "c.py"]));

    check(&dir)
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
    assert_eq!(log_lines(&dir).len(), 6);
}

#[test]
fn check_without_log_is_a_no_op() {
    let dir = assert_fs::TempDir::new().unwrap();

    check(&dir)
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    dir.child(LOG).assert(predicate::path::missing());
}

#[test]
fn check_without_log_on_unwritable_state_dir_is_a_no_op() {
    let dir = assert_fs::TempDir::new().unwrap();
    // A file where the log directory belongs, as in a read-only checkout.
    dir.child(".claude/code-review").write_str("").unwrap();

    review_gate(&dir)
        .arg("check")
        .write_stdin("{}")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    check(&dir)
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn check_dedupes_repeated_edits() {
    let dir = assert_fs::TempDir::new().unwrap();

    for _ in 0..5 {
        track(&dir, "Edit", "lib/util.ts");
    }
    track(&dir, "MultiEdit", "app.ts");

    check(&dir).code(2).stdout("app.ts\nlib/util.ts\n");
}

#[test]
fn check_skips_malformed_lines() {
    let dir = assert_fs::TempDir::new().unwrap();
    let log = [
        modified("a.py"),
        "{truncated".to_string(),
        r#"{"event":"mystery"}"#.to_string(),
        String::new(),
        modified("b.py"),
    ]
    .join("\n");
    dir.child(LOG).write_str(&log).unwrap();

    check(&dir).code(2).stdout("a.py\nb.py\n");
}

#[test]
fn check_is_a_no_op_when_disabled() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(SETTINGS)
        .write_str(r#"{"codeReview":{"enabled":false}}"#)
        .unwrap();
    dir.child(LOG).write_str(&format!("{}\n", modified("a.py"))).unwrap();

    check(&dir)
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert_eq!(log_lines(&dir).len(), 1, "no marker when disabled");
}

#[test]
fn check_with_empty_stdin_still_queries() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(LOG).write_str(&format!("{}\n", modified("a.py"))).unwrap();

    review_gate(&dir)
        .arg("check")
        .write_stdin("")
        .assert()
        .code(2)
        .stdout("a.py\n");

    dir.child(SETTINGS).assert(predicate::path::missing());
}

#[test]
fn track_then_check_cycle() {
    let dir = assert_fs::TempDir::new().unwrap();

    track(&dir, "Write", "a.py");
    check(&dir).code(2).stdout("a.py\n");
    check(&dir).code(0);

    track(&dir, "Edit", "b.py");
    check(&dir).code(2).stdout("b.py\n");
}

#[test]
fn project_dir_flag_targets_another_directory() {
    let dir = assert_fs::TempDir::new().unwrap();
    let project = assert_fs::TempDir::new().unwrap();

    review_gate(&dir)
        .args(["--project-dir", project.path().to_str().unwrap(), "track"])
        .write_stdin(tool_event("s1", "Write", "a.py"))
        .assert()
        .success();

    project.child(LOG).assert(predicate::path::exists());
    dir.child(".claude").assert(predicate::path::missing());

    review_gate(&dir)
        .arg("check")
        .env("CLAUDE_PROJECT_DIR", project.path())
        .write_stdin(r#"{"session_id":"s1"}"#)
        .assert()
        .code(2)
        .stdout("a.py\n");
}
