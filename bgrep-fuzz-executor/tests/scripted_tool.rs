//! Integration test: the `bgrep` backend against shell scripts that stand in
//! for the real binary.
//!
//! Everything runs inside one test so no other test thread can fork while a
//! script file is still open for writing (which would make exec fail with
//! `ETXTBSY`).

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bgrep_fuzz_core::{format_matches, TestCase};
use bgrep_fuzz_executor::{BgrepTool, CaseRunner, DataFile, ExecutorError, SearchTool, ToolConfig};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = std::fs::metadata(&path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod script");
    path
}

#[tokio::test]
async fn scripted_tools_cover_success_failure_and_timeout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_file = DataFile::new(dir.path().join("data")).expect("utf-8 path");
    let case = TestCase::new(vec![0, 1, 2, 3, 4, 5, 2, 3, 9], vec![2, 3]).expect("valid case");

    // A correct tool for the reference case: checks its argv, then prints
    // both matches using the filename it was given.
    let correct = write_script(
        dir.path(),
        "correct",
        r#"[ "$1" = "-Hb" ] && [ "$2" = "0203" ] && [ -s "$3" ] || exit 2
printf '%s:00000002\n%s:00000006\n' "$3" "$3""#,
    );
    let runner = CaseRunner::new(BgrepTool::new(ToolConfig::new(correct)), data_file.clone());
    let output = runner.run(&case).await.expect("correct script succeeds");
    let expected = format_matches(data_file.name(), &case.expected_matches());
    assert_eq!(output.stdout, expected.as_bytes(), "stdout must be captured verbatim");

    // The data file holds the case bytes once the tool has run.
    let on_disk = std::fs::read(data_file.path()).expect("read data file");
    assert_eq!(on_disk, case.data());

    // Exit status 2 is an error report from the tool, not a result.
    let broken = write_script(dir.path(), "broken", "echo 'bgrep: invalid hex' >&2; exit 2");
    let tool = BgrepTool::new(ToolConfig::new(broken));
    match tool.search(case.pattern(), data_file.path()).await {
        Err(ExecutorError::ToolFailed { code, stderr }) => {
            assert_eq!(code, 2);
            assert_eq!(stderr, "bgrep: invalid hex");
        }
        other => panic!("expected ToolFailed, got {other:?}"),
    }

    // A hung tool is cut off by the timeout.
    let hung = write_script(dir.path(), "hung", "exec sleep 30");
    let tool = BgrepTool::new(
        ToolConfig::new(hung).with_timeout(Some(Duration::from_millis(200))),
    );
    let result = tool.search(case.pattern(), data_file.path()).await;
    assert!(
        matches!(result, Err(ExecutorError::Timeout { .. })),
        "hung tool must time out, got {result:?}"
    );

    // Killed by a signal.
    let killed = write_script(dir.path(), "killed", "kill -9 $$");
    let tool = BgrepTool::new(ToolConfig::new(killed));
    let result = tool.search(case.pattern(), data_file.path()).await;
    assert!(
        matches!(result, Err(ExecutorError::TerminatedBySignal)),
        "signalled tool must be a hard failure, got {result:?}"
    );
}
