//! Interpreter environment provisioning for the resolver process.
//!
//! The resolver needs a Python interpreter with the pinned jedi requirement
//! installed. This module keeps a dedicated venv under a caller-chosen work
//! directory, verifies it with an import smoke check, and repairs a corrupt
//! installation by deleting and recreating it, at most once per call, so a
//! persistently broken toolchain surfaces as a hard error instead of a
//! retry loop.
//!
//! Provisioning is best-effort by design: create and install failures are
//! logged and the expected interpreter path is still handed back, because
//! the subsequent spawn produces the more actionable error.
//!
//! Not safe against concurrent callers targeting the same work directory;
//! the delete-then-recreate repair would race.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::jedi::error::ProvisionError;

/// The pinned resolver dependency installed into the venv.
pub const JEDI_REQUIREMENT: &str = "jedi==0.19.2";

/// Bootstrap script run by the resolver process, deployed next to the venv
/// so a repair never deletes it.
pub const RESOLVER_SCRIPT: &str = include_str!("../../scripts/resolve_symbol.py");

const VENV_DIR_NAME: &str = "venv";
const SCRIPT_NAME: &str = "resolve_symbol.py";

/// One delete-and-recreate repair per call; a second consecutive failure is
/// a hard error.
const MAX_REPAIRS: u32 = 1;

#[cfg(target_os = "windows")]
const PYTHON_CANDIDATES: &[&str] = &["python"];

#[cfg(not(target_os = "windows"))]
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// A provisioned (or best-effort provisioned) resolver environment.
#[derive(Debug, Clone)]
pub struct JediEnvironment {
    work_dir: PathBuf,
}

impl JediEnvironment {
    /// Ensure a runnable interpreter with jedi installed exists under
    /// `work_dir`, locating a bootstrap interpreter on PATH.
    pub async fn ensure(work_dir: &Path) -> Result<Self, ProvisionError> {
        let bootstrap = find_bootstrap_python()?;
        Self::ensure_with_bootstrap(work_dir, &bootstrap).await
    }

    /// Like [`ensure`](Self::ensure) with an explicit bootstrap interpreter
    /// instead of PATH discovery.
    pub async fn ensure_with_bootstrap(
        work_dir: &Path,
        bootstrap: &Path,
    ) -> Result<Self, ProvisionError> {
        let env = Self {
            work_dir: work_dir.to_path_buf(),
        };
        env.deploy_script()?;

        let mut repairs = 0;
        loop {
            if !env.interpreter_path().exists() {
                if let Err(reason) = env.create(bootstrap).await {
                    // Best effort: hand back the expected path and let the
                    // spawn surface the real failure.
                    warn!("provisioning {} failed: {reason}", env.venv_dir().display());
                    return Ok(env);
                }
            }

            if env.smoke_check().await {
                debug!("interpreter verified at {}", env.interpreter_path().display());
                return Ok(env);
            }

            if repairs >= MAX_REPAIRS {
                return Err(ProvisionError::PersistentlyCorrupt {
                    path: env.venv_dir(),
                });
            }
            repairs += 1;

            warn!(
                "environment at {} failed the import check, recreating",
                env.venv_dir().display()
            );
            if let Err(e) = tokio::fs::remove_dir_all(env.venv_dir()).await {
                warn!("failed to remove corrupt environment: {e}");
            }
        }
    }

    /// Path of the interpreter inside the venv. The file may not exist if
    /// provisioning only partially succeeded.
    pub fn interpreter_path(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv_dir().join("Scripts").join("python.exe")
        } else {
            let bin = self.venv_dir().join("bin");
            let python3 = bin.join("python3");
            if python3.exists() {
                python3
            } else {
                bin.join("python")
            }
        }
    }

    /// Path of the deployed resolver script.
    pub fn script_path(&self) -> PathBuf {
        self.work_dir.join(SCRIPT_NAME)
    }

    fn venv_dir(&self) -> PathBuf {
        self.work_dir.join(VENV_DIR_NAME)
    }

    fn deploy_script(&self) -> Result<(), ProvisionError> {
        let path = self.script_path();
        std::fs::create_dir_all(&self.work_dir).map_err(|source| ProvisionError::ScriptWrite {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, RESOLVER_SCRIPT).map_err(|source| ProvisionError::ScriptWrite {
            path,
            source,
        })
    }

    async fn create(&self, bootstrap: &Path) -> Result<(), String> {
        info!(
            "creating resolver environment at {}",
            self.venv_dir().display()
        );

        let status = Command::new(bootstrap)
            .arg("-m")
            .arg("venv")
            .arg(self.venv_dir())
            .status()
            .await
            .map_err(|e| format!("failed to run venv: {e}"))?;
        if !status.success() {
            return Err(format!("python -m venv exited with {status}"));
        }

        let status = Command::new(self.interpreter_path())
            .args(["-m", "pip", "install", JEDI_REQUIREMENT])
            .status()
            .await
            .map_err(|e| format!("failed to run pip: {e}"))?;
        if !status.success() {
            return Err(format!("pip install {JEDI_REQUIREMENT} exited with {status}"));
        }

        Ok(())
    }

    /// Import the resolver dependency in a short-lived subprocess; any
    /// failure (including a spawn failure) counts as corruption.
    async fn smoke_check(&self) -> bool {
        Command::new(self.interpreter_path())
            .args(["-c", "import jedi"])
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

/// Find an interpreter on PATH suitable for bootstrapping the venv.
fn find_bootstrap_python() -> Result<PathBuf, ProvisionError> {
    for candidate in PYTHON_CANDIDATES {
        if let Ok(path) = which::which(candidate) {
            return Ok(path);
        }
    }
    Err(ProvisionError::PythonNotFound(PYTHON_CANDIDATES.join(", ")))
}
