//! File-backed session persistence.
//!
//! `FileSessionStorage` mirrors the current session to a single JSON file so
//! an app restart can resume an in-progress session without data loss. Writes
//! go through a temporary file with an explicit fsync and an atomic rename,
//! so the mirror is never observable half-written.
//!
//! Layout:
//! ```text
//! base_dir/
//! ├── current_session.json        (absent when no session is active)
//! └── default_grade_system.txt    (user-chosen default, optional)
//! ```

use anyhow::Context;
use belay_core::error::{BelayError, Result};
use belay_core::repository::SessionRepository;
use belay_core::session::Session;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "current_session.json";
const DEFAULT_SYSTEM_FILE: &str = "default_grade_system.txt";

/// Durable mirror of the current session on the local filesystem.
pub struct FileSessionStorage {
    base_dir: PathBuf,
}

impl FileSessionStorage {
    /// Creates a storage instance rooted at `base_dir`, creating the
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create storage directory: {:?}", base_dir))?;
        Ok(Self { base_dir })
    }

    /// Creates a storage instance at the default location (`~/.belay`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// directory cannot be created.
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| BelayError::storage("Failed to get home directory"))?;
        Self::new(home_dir.join(".belay"))
    }

    fn session_path(&self) -> PathBuf {
        self.base_dir.join(SESSION_FILE)
    }

    fn default_system_path(&self) -> PathBuf {
        self.base_dir.join(DEFAULT_SYSTEM_FILE)
    }

    /// Writes `content` to `path` atomically: tmp file in the same
    /// directory, fsync, then rename over the target.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let file_name = path
            .file_name()
            .ok_or_else(|| BelayError::storage("Storage path has no file name"))?;
        let tmp_path = self
            .base_dir
            .join(format!(".{}.tmp", file_name.to_string_lossy()));

        let mut tmp_file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create temp file: {:?}", tmp_path))?;
        tmp_file
            .write_all(content.as_bytes())
            .context("Failed to write temp file")?;
        tmp_file.sync_all().context("Failed to sync temp file")?;
        drop(tmp_file);

        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to rename into place: {:?}", path))?;
        Ok(())
    }
}

impl SessionRepository for FileSessionStorage {
    fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session)?;
        self.write_atomic(&self.session_path(), &json)
    }

    fn load(&self) -> Result<Option<Session>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file: {:?}", path))?;
        let session: Session = serde_json::from_str(&json)?;
        Ok(Some(session))
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete session file: {:?}", path))?;
        }
        Ok(())
    }

    fn load_default_grade_system(&self) -> Result<Option<i64>> {
        let path = self.default_system_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .context("Failed to read default grade system")?;
        match raw.trim().parse::<i64>() {
            Ok(grade_id) => Ok(Some(grade_id)),
            Err(_) => {
                // A corrupt preference is not worth failing session start over.
                tracing::warn!("Ignoring unparseable default grade system: {raw:?}");
                Ok(None)
            }
        }
    }

    fn save_default_grade_system(&self, grade_id: i64) -> Result<()> {
        self.write_atomic(&self.default_system_path(), &grade_id.to_string())
    }
}
