//! Upload directory storage for the hub.

use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use termkit_core::{
    HubError, SharedFile, UploadedFile, content_type_for, sanitize_file_name, stored_file_name,
};
use thiserror::Error;
use tokio::task::JoinError;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Hub(#[from] HubError),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("no files to archive")]
    NoFiles,

    #[error("upload directory I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive task failed: {0}")]
    Task(#[from] JoinError),
}

/// Flat directory of uploaded files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All stored files, newest first.
    pub async fn list(&self) -> io::Result<Vec<SharedFile>> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let uploaded_at = metadata
                .modified()
                .map_or_else(|_| Utc::now(), DateTime::<Utc>::from);
            files.push(SharedFile {
                content_type: content_type_for(&name).to_string(),
                name,
                size: metadata.len(),
                uploaded_at,
            });
        }

        files.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(files)
    }

    pub async fn count(&self) -> io::Result<usize> {
        Ok(self.list().await?.len())
    }

    /// Store `bytes` under a fresh unique name derived from `original_name`.
    pub async fn save(
        &self,
        original_name: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<UploadedFile, UploadError> {
        let nonce = rand::random::<u32>() % 1_000_000_000;
        let name = stored_file_name(original_name, Utc::now().timestamp_millis(), nonce)?;
        tokio::fs::write(self.dir.join(&name), bytes).await?;

        let content_type = content_type
            .filter(|ct| !ct.is_empty())
            .map_or_else(|| content_type_for(&name).to_string(), str::to_string);

        Ok(UploadedFile {
            name,
            original_name: original_name.to_string(),
            size: bytes.len() as u64,
            content_type,
        })
    }

    /// Path of an existing stored file.
    ///
    /// Names carrying directory components are rejected rather than
    /// reduced, so a request can never address anything outside the store.
    pub async fn resolve(&self, name: &str) -> Result<PathBuf, UploadError> {
        let safe = sanitize_file_name(name)?;
        if safe != name {
            return Err(HubError::InvalidFileName(name.to_string()).into());
        }

        let path = self.dir.join(&safe);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(UploadError::NotFound(safe)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(UploadError::NotFound(safe)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, name: &str) -> Result<(), UploadError> {
        let path = self.resolve(name).await?;
        tokio::fs::remove_file(path).await?;
        Ok(())
    }

    /// Zip every stored file into an in-memory archive.
    pub async fn archive(&self) -> Result<Vec<u8>, UploadError> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || build_archive(&dir)).await?
    }
}

fn build_archive(dir: &Path) -> Result<Vec<u8>, UploadError> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    if entries.is_empty() {
        return Err(UploadError::NoFiles);
    }
    entries.sort();

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, path) in entries {
        writer.start_file(name, options)?;
        let mut file = std::fs::File::open(path)?;
        io::copy(&mut file, &mut writer)?;
    }
    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_save_prefixes_and_lists() {
        let (_dir, store) = store();
        let saved = store.save("notes.txt", b"hello", None).await.unwrap();

        assert!(saved.name.ends_with("-notes.txt"));
        assert_eq!(saved.original_name, "notes.txt");
        assert_eq!(saved.size, 5);
        assert_eq!(saved.content_type, "text/plain");

        let files = store.list().await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, saved.name);
        assert_eq!(files[0].size, 5);
    }

    #[tokio::test]
    async fn test_same_name_twice_keeps_both() {
        let (_dir, store) = store();
        let a = store.save("a.bin", b"1", None).await.unwrap();
        let b = store.save("a.bin", b"22", None).await.unwrap();
        assert_ne!(a.name, b.name);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_strips_directories() {
        let (dir, store) = store();
        let saved = store.save("../../etc/passwd", b"x", None).await.unwrap();
        assert!(saved.name.ends_with("-passwd"));
        assert!(dir.path().join(&saved.name).is_file());
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let (_dir, store) = store();
        let err = store.resolve("../secret").await.unwrap_err();
        assert!(matches!(err, UploadError::Hub(HubError::InvalidFileName(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store.delete("nope.txt").await.unwrap_err();
        assert!(matches!(err, UploadError::NotFound(name) if name == "nope.txt"));
    }

    #[tokio::test]
    async fn test_delete_removes_file() {
        let (_dir, store) = store();
        let saved = store.save("a.txt", b"x", None).await.unwrap();
        store.delete(&saved.name).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_archive_empty_store() {
        let (_dir, store) = store();
        assert!(matches!(store.archive().await, Err(UploadError::NoFiles)));
    }

    #[tokio::test]
    async fn test_archive_contains_every_file() {
        let (_dir, store) = store();
        store.save("a.txt", b"alpha", None).await.unwrap();
        store.save("b.txt", b"beta", None).await.unwrap();

        let bytes = store.archive().await.unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.iter().any(|n| n.ends_with("-a.txt")));
        assert!(names.iter().any(|n| n.ends_with("-b.txt")));
    }
}
