//! Resolver bridge E2E tests
//!
//! Exercises the process session against `/bin/sh` stand-ins that speak the
//! one-line-per-message protocol, so no Python installation is needed.

#![cfg(unix)]

mod helper;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::time::timeout;

use helper::write_script;
use pyhelp::jedi::{BridgeError, JediBridge, SymbolQuery};

const SH: &str = "/bin/sh";

fn query_at(file: &Path, line: u32, column: u32) -> SymbolQuery<'_> {
    SymbolQuery {
        file,
        line,
        column,
        python_executable: None,
        file_text: None,
    }
}

async fn run_query(bridge: &JediBridge, query: &SymbolQuery<'_>) -> Result<Option<String>, BridgeError> {
    timeout(Duration::from_secs(5), bridge.query(query))
        .await
        .expect("query timed out")
}

#[tokio::test(flavor = "multi_thread")]
async fn answers_arrive_in_request_order_over_one_session() {
    let dir = TempDir::new().unwrap();
    // Numbered answers expose any request/response misalignment.
    let script = write_script(
        dir.path(),
        "resolver.sh",
        "#!/bin/sh\nn=0\nwhile read line; do\n    n=$((n+1))\n    echo \"\\\"sym.$n\\\"\"\ndone\n",
    );
    let bridge = JediBridge::open(Path::new(SH), &script);

    let source = dir.path().join("example.py");
    for expected in ["sym.1", "sym.2", "sym.3"] {
        let answer = run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap();
        assert_eq!(answer.as_deref(), Some(expected));
    }

    bridge.close().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_queries_are_serialized() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        dir.path(),
        "resolver.sh",
        "#!/bin/sh\nn=0\nwhile read line; do\n    n=$((n+1))\n    echo \"\\\"sym.$n\\\"\"\ndone\n",
    );
    let bridge = JediBridge::open(Path::new(SH), &script);

    let source = dir.path().join("example.py");
    let first = query_at(&source, 1, 1);
    let second = query_at(&source, 2, 2);
    let (a, b) = tokio::join!(run_query(&bridge, &first), run_query(&bridge, &second));

    // Each query gets exactly one answer; which one depends on lock order.
    let mut answers = vec![a.unwrap().unwrap(), b.unwrap().unwrap()];
    answers.sort();
    assert_eq!(answers, ["sym.1", "sym.2"]);

    bridge.close().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn request_is_one_json_line_with_optional_fields_omitted() {
    let dir = TempDir::new().unwrap();
    let capture = dir.path().join("request.json");
    let script = write_script(
        dir.path(),
        "resolver.sh",
        &format!(
            "#!/bin/sh\nread -r line\nprintf '%s\\n' \"$line\" > \"{}\"\necho '\"ok\"'\n",
            capture.display()
        ),
    );
    let bridge = JediBridge::open(Path::new(SH), &script);

    let source = dir.path().join("example.py");
    let answer = run_query(
        &bridge,
        &SymbolQuery {
            file: &source,
            line: 3,
            column: 7,
            python_executable: None,
            file_text: Some("import os\n"),
        },
    )
    .await
    .unwrap();
    assert_eq!(answer.as_deref(), Some("ok"));
    bridge.close().await;

    let request: serde_json::Value =
        serde_json::from_str(std::fs::read_to_string(&capture).unwrap().trim()).unwrap();
    assert_eq!(request["file"], source.to_string_lossy().as_ref());
    assert_eq!(request["line"], 3);
    assert_eq!(request["column"], 7);
    assert_eq!(request["fileText"], "import os\n");
    assert!(request.get("pythonExecutable").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn null_answer_means_no_symbol_at_position() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        dir.path(),
        "resolver.sh",
        "#!/bin/sh\nwhile read line; do echo null; done\n",
    );
    let bridge = JediBridge::open(Path::new(SH), &script);

    let source = dir.path().join("example.py");
    let answer = run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap();
    assert_eq!(answer, None);

    bridge.close().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn non_json_answer_is_reported_with_the_offending_line() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        dir.path(),
        "resolver.sh",
        "#!/bin/sh\nwhile read line; do echo 'not json'; done\n",
    );
    let bridge = JediBridge::open(Path::new(SH), &script);

    let source = dir.path().join("example.py");
    let err = run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap_err();
    match err {
        BridgeError::MalformedResponse { line } => assert_eq!(line, "not json"),
        other => panic!("expected MalformedResponse, got {other:?}"),
    }

    bridge.close().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn exited_resolver_fails_queries_without_respawn() {
    let dir = TempDir::new().unwrap();
    let script = write_script(dir.path(), "resolver.sh", "#!/bin/sh\nexit 0\n");
    let bridge = JediBridge::open(Path::new(SH), &script);

    let source = dir.path().join("example.py");
    let err = run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap_err();
    assert!(matches!(err, BridgeError::ResolverDied));

    // The session stays dead; no second process is spawned.
    let err = run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap_err();
    assert!(matches!(err, BridgeError::ResolverDied));
}

#[tokio::test(flavor = "multi_thread")]
async fn spawn_failure_surfaces_on_first_query() {
    let dir = TempDir::new().unwrap();
    let bridge = JediBridge::open(
        Path::new("/nonexistent/python3"),
        &dir.path().join("resolver.sh"),
    );

    let source = dir.path().join("example.py");
    let err = run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap_err();
    assert!(matches!(err, BridgeError::Spawn(_)));

    let err = run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap_err();
    assert!(matches!(err, BridgeError::ResolverDied));
}

#[tokio::test(flavor = "multi_thread")]
async fn close_interrupts_a_pending_query() {
    let dir = TempDir::new().unwrap();
    // Reads requests but never answers, like a wedged resolver.
    let script = write_script(
        dir.path(),
        "resolver.sh",
        "#!/bin/sh\nwhile read -r line; do :; done\n",
    );
    let bridge = Arc::new(JediBridge::open(Path::new(SH), &script));

    let source = dir.path().join("example.py");
    let pending = {
        let bridge = Arc::clone(&bridge);
        tokio::spawn(async move { bridge.query(&query_at(&source, 1, 1)).await })
    };

    // Let the query get in flight before closing.
    tokio::time::sleep(Duration::from_millis(200)).await;
    timeout(Duration::from_secs(2), bridge.close())
        .await
        .expect("close blocked behind the pending query");

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(err, BridgeError::ResolverDied));
}

#[tokio::test(flavor = "multi_thread")]
async fn close_is_idempotent_and_final() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        dir.path(),
        "resolver.sh",
        "#!/bin/sh\nwhile read line; do echo null; done\n",
    );
    let bridge = JediBridge::open(Path::new(SH), &script);

    let source = dir.path().join("example.py");
    run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap();

    bridge.close().await;
    bridge.close().await;

    let err = run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap_err();
    assert!(matches!(err, BridgeError::ResolverDied));
}

#[tokio::test(flavor = "multi_thread")]
async fn stderr_burst_coalesces_into_one_warning() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        dir.path(),
        "resolver.sh",
        "#!/bin/sh\nread line\necho 'Traceback (most recent call last):' >&2\necho 'ValueError: boom' >&2\necho null\n",
    );
    let bridge = JediBridge::open(Path::new(SH), &script);
    let mut warnings = bridge.take_warnings().unwrap();
    assert!(bridge.take_warnings().is_none());

    let source = dir.path().join("example.py");
    run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap();

    let message = timeout(Duration::from_secs(2), warnings.recv())
        .await
        .expect("no warning arrived")
        .unwrap();
    assert_eq!(message, "Traceback (most recent call last):\nValueError: boom");

    bridge.close().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn bursts_separated_by_a_pause_become_separate_warnings() {
    let dir = TempDir::new().unwrap();
    // The pause is well past the coalescing window.
    let script = write_script(
        dir.path(),
        "resolver.sh",
        "#!/bin/sh\nread line\necho 'first burst' >&2\nsleep 0.5\necho 'second burst' >&2\necho null\n",
    );
    let bridge = JediBridge::open(Path::new(SH), &script);
    let mut warnings = bridge.take_warnings().unwrap();

    let source = dir.path().join("example.py");
    run_query(&bridge, &query_at(&source, 1, 1)).await.unwrap();

    let first = timeout(Duration::from_secs(2), warnings.recv())
        .await
        .expect("no first warning")
        .unwrap();
    let second = timeout(Duration::from_secs(2), warnings.recv())
        .await
        .expect("no second warning")
        .unwrap();
    assert_eq!(first, "first burst");
    assert_eq!(second, "second burst");

    bridge.close().await;
}
