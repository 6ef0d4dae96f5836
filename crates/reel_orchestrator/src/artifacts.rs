//! Writing phase artifacts to the output directory.

use reel_core::{ProjectState, Screenplay, ShotList};
use reel_error::{ReelResult, StorageError, StorageErrorKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Screenplay artifact file name.
pub const SCREENPLAY_FILE: &str = "screenplay.json";

/// Shot list artifact file name.
pub const SHOTLIST_FILE: &str = "shotlist.json";

/// Project state snapshot file name.
pub const PROJECT_STATE_FILE: &str = "project_state.json";

/// Serialize `value` as pretty-printed JSON into `path`.
pub async fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> ReelResult<()> {
    let body = serde_json::to_string_pretty(value).map_err(|e| {
        StorageError::new(StorageErrorKind::Serialization(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    tokio::fs::write(path, body).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    debug!(path = %path.display(), "Artifact written");
    Ok(())
}

/// Write the screenplay, shot list and state snapshot into `output_dir`.
///
/// The snapshot is for inspection; nothing reads it back.
#[instrument(skip_all, fields(output_dir = %output_dir.display()))]
pub async fn persist_artifacts(
    output_dir: &Path,
    script: &Screenplay,
    shot_list: &ShotList,
    state: &ProjectState,
) -> ReelResult<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            output_dir.display(),
            e
        )))
    })?;

    write_json_pretty(&output_dir.join(SCREENPLAY_FILE), script).await?;
    write_json_pretty(&output_dir.join(SHOTLIST_FILE), shot_list).await?;
    write_json_pretty(&output_dir.join(PROJECT_STATE_FILE), state).await?;

    info!("Screenplay and shot list saved");
    Ok(output_dir.to_path_buf())
}
