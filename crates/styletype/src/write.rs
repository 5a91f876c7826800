//! Idempotent artifact writing.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::{Error, Result};

/// Whether a write call touched the file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The artifact differed and was replaced.
    Written,
    /// The artifact already held these bytes; nothing was touched.
    Unchanged,
}

/// Path of the declaration artifact for a style-sheet source.
///
/// The suffix is appended to the full file name, so `a.module.scss` maps to
/// `a.module.scss.d.ts`.
pub fn artifact_path(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_os_string();
    name.push(".d.ts");
    PathBuf::from(name)
}

/// Write `bytes` to `path` unless the file already holds exactly them.
///
/// A changed artifact is replaced through a temporary file in the same
/// directory renamed over the target, so readers see either the old bytes
/// or the new ones, never a mix. An unchanged artifact is left completely
/// untouched; no file-system event fires for it.
pub async fn write_if_changed(path: &Path, bytes: &[u8]) -> Result<WriteOutcome> {
    match fs::read(path).await {
        Ok(existing) if existing == bytes => return Ok(WriteOutcome::Unchanged),
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(path, e)),
    }

    replace_file(path, bytes).await?;
    Ok(WriteOutcome::Written)
}

/// Replace `path` with `bytes` via a same-directory temporary file.
async fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    // Overlapping runs over the same artifact must not share a temp file.
    static SEQ: AtomicU64 = AtomicU64::new(0);

    let parent = path.parent().unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "artifact".to_string());
    let temp_path = parent.join(format!(
        ".{}.tmp.{}.{}",
        file_name,
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    ));

    if let Err(e) = write_synced(&temp_path, bytes).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(Error::io(path, e));
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(Error::io(path, e));
    }

    Ok(())
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn appends_the_declaration_suffix() {
        assert_eq!(
            artifact_path(Path::new("a.module.scss")),
            PathBuf::from("a.module.scss.d.ts")
        );
        assert_eq!(
            artifact_path(Path::new("src/button.css")),
            PathBuf::from("src/button.css.d.ts")
        );
    }

    #[tokio::test]
    async fn creates_a_missing_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("styles.css.d.ts");

        let outcome = write_if_changed(&path, b"content").await.unwrap();
        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(std::fs::read(&path).unwrap(), b"content");
    }

    #[tokio::test]
    async fn equal_bytes_do_not_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("styles.css.d.ts");
        std::fs::write(&path, b"same").unwrap();

        let outcome = write_if_changed(&path, b"same").await.unwrap();
        assert_eq!(outcome, WriteOutcome::Unchanged);
    }

    #[tokio::test]
    async fn differing_bytes_replace_the_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("styles.css.d.ts");
        std::fs::write(&path, b"a much longer previous artifact body").unwrap();

        let outcome = write_if_changed(&path, b"short").await.unwrap();
        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(std::fs::read(&path).unwrap(), b"short");
    }

    #[tokio::test]
    async fn leaves_no_temp_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("styles.css.d.ts");
        write_if_changed(&path, b"content").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1, "only the artifact should remain: {names:?}");
    }

    #[tokio::test]
    async fn concurrent_replacements_do_not_collide() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("styles.css.d.ts");

        let (a, b) = tokio::join!(
            write_if_changed(&path, b"first payload"),
            write_if_changed(&path, b"second payload"),
        );
        a.unwrap();
        b.unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(
            written == b"first payload" || written == b"second payload",
            "unexpected artifact content: {written:?}"
        );

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n.to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    }
}
