//! Bridge to the long-lived resolver process.
//!
//! Owns the child process and speaks the one-line-per-message protocol over
//! its standard streams. The protocol has no request identifiers, so the
//! bridge serializes queries by construction: the whole write-then-read
//! exchange happens under one async mutex, and a second query waits for the
//! first response. Standard error is drained concurrently and fed into a
//! coalescing window so a stack trace becomes one warning, not thirty.
//!
//! The bridge never respawns a dead child; after [`BridgeError::ResolverDied`]
//! the caller decides whether to open a fresh bridge. Deadlines are also the
//! caller's job: wrap [`JediBridge::query`] in a timeout if one is needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

use crate::jedi::error::BridgeError;
use crate::jedi::protocol::{ResolveRequest, parse_response};

/// How long after the first stderr line further lines keep merging into the
/// same warning.
pub const STDERR_COALESCE_WINDOW: Duration = Duration::from_millis(100);

/// A cursor position to resolve into a symbol name.
#[derive(Debug)]
pub struct SymbolQuery<'a> {
    pub file: &'a Path,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
    /// Project interpreter the resolver should inspect, if different from
    /// the one running it.
    pub python_executable: Option<&'a Path>,
    /// Unsaved buffer contents, used instead of the on-disk file.
    pub file_text: Option<&'a str>,
}

enum SessionState {
    /// Not spawned yet; the child starts on first query so spawn errors
    /// surface on first use.
    Idle,
    Live(Session),
    /// Died or closed. No automatic respawn.
    Dead,
}

struct Session {
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

/// A session with the resolver process.
pub struct JediBridge {
    interpreter: PathBuf,
    script: PathBuf,
    state: Mutex<SessionState>,
    /// Kill handle kept outside the query lock, so [`close`](Self::close)
    /// can terminate the child while a query is awaiting its response.
    child: std::sync::Mutex<Option<Child>>,
    warnings_tx: mpsc::UnboundedSender<String>,
    warnings_rx: std::sync::Mutex<Option<mpsc::UnboundedReceiver<String>>>,
}

impl JediBridge {
    /// Create a bridge that will run `script` with `interpreter`. Never
    /// fails synchronously; the process is spawned on first query.
    pub fn open(interpreter: &Path, script: &Path) -> Self {
        let (warnings_tx, warnings_rx) = mpsc::unbounded_channel();
        Self {
            interpreter: interpreter.to_path_buf(),
            script: script.to_path_buf(),
            state: Mutex::new(SessionState::Idle),
            child: std::sync::Mutex::new(None),
            warnings_tx,
            warnings_rx: std::sync::Mutex::new(Some(warnings_rx)),
        }
    }

    /// Take the channel of coalesced diagnostic warnings. Yields once per
    /// stderr burst; `None` after the first call.
    pub fn take_warnings(&self) -> Option<mpsc::UnboundedReceiver<String>> {
        self.warnings_rx.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Resolve the symbol at a position. Returns `Ok(None)` when the
    /// resolver reports no symbol there (whitespace, syntax error).
    pub async fn query(&self, query: &SymbolQuery<'_>) -> Result<Option<String>, BridgeError> {
        // One guard for the whole exchange: request/response pairing is
        // positional, so nothing may interleave.
        let mut state = self.state.lock().await;

        match &*state {
            SessionState::Dead => return Err(BridgeError::ResolverDied),
            SessionState::Idle => match self.spawn() {
                Ok(session) => *state = SessionState::Live(session),
                Err(e) => {
                    *state = SessionState::Dead;
                    return Err(BridgeError::Spawn(e));
                }
            },
            SessionState::Live(_) => {}
        }
        let SessionState::Live(session) = &mut *state else {
            return Err(BridgeError::ResolverDied);
        };

        let file = query.file.to_string_lossy();
        let python = query.python_executable.map(|p| p.to_string_lossy());
        let request = ResolveRequest {
            file: &file,
            line: query.line,
            column: query.column,
            python_executable: python.as_deref(),
            file_text: query.file_text,
        };
        let line = request.to_line()?;

        if session.stdin.write_all(line.as_bytes()).await.is_err() {
            *state = SessionState::Dead;
            return Err(BridgeError::ResolverDied);
        }

        match session.stdout.next_line().await {
            Ok(Some(response)) => {
                debug!("resolver answered: {response}");
                parse_response(&response)
            }
            // EOF or read failure: the child is gone and the query must
            // fail rather than hang.
            Ok(None) | Err(_) => {
                *state = SessionState::Dead;
                Err(BridgeError::ResolverDied)
            }
        }
    }

    /// Terminate the resolver process and release the session. Idempotent;
    /// safe to call before any query. A query in flight fails with
    /// [`BridgeError::ResolverDied`], as does any later one.
    pub async fn close(&self) {
        // Kill through the handle first: the state lock may be held by a
        // pending query, and the kill is what makes that query return.
        let child = match self.child.lock() {
            Ok(mut slot) => {
                if let Some(child) = slot.as_mut() {
                    if let Err(e) = child.start_kill() {
                        warn!("failed to kill resolver process: {e}");
                    }
                }
                slot.take()
            }
            Err(_) => None,
        };
        if let Some(mut child) = child {
            let _ = child.wait().await;
        }

        *self.state.lock().await = SessionState::Dead;
    }

    fn spawn(&self) -> std::io::Result<Session> {
        let mut child = Command::new(&self.interpreter)
            .arg(&self.script)
            .env("PYTHONUNBUFFERED", "1")
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let missing =
            |stream: &str| std::io::Error::other(format!("resolver child has no {stream}"));
        let stdin = child.stdin.take().ok_or_else(|| missing("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| missing("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| missing("stderr"))?;

        tokio::spawn(drain_stderr(stderr, self.warnings_tx.clone()));

        match self.child.lock() {
            Ok(mut slot) => *slot = Some(child),
            Err(_) => return Err(std::io::Error::other("resolver kill handle poisoned")),
        }

        Ok(Session {
            stdin,
            stdout: BufReader::new(stdout).lines(),
        })
    }
}

/// Drain the child's stderr independently of the request path. The first
/// line of a burst opens the coalescing window; everything inside it merges
/// into one warning.
async fn drain_stderr(stderr: ChildStderr, warnings: mpsc::UnboundedSender<String>) {
    let mut lines = BufReader::new(stderr).lines();
    loop {
        let first = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => break,
        };

        let mut burst = vec![first];
        let mut closed = false;
        let window = tokio::time::sleep(STDERR_COALESCE_WINDOW);
        tokio::pin!(window);
        loop {
            tokio::select! {
                () = &mut window => break,
                next = lines.next_line() => match next {
                    Ok(Some(line)) => burst.push(line),
                    Ok(None) | Err(_) => {
                        closed = true;
                        break;
                    }
                },
            }
        }

        let message = burst.join("\n");
        warn!("resolver diagnostics:\n{message}");
        let _ = warnings.send(message);

        if closed {
            break;
        }
    }
}
