//! Transcripts read from disk.

use std::path::PathBuf;

use tracing::debug;

use super::TranscriptSource;
use crate::error::SourceError;

/// Treats the query as a path to a saved transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl TranscriptSource for FileSource {
    async fn fetch(&self, query: &str) -> Result<String, SourceError> {
        let path = PathBuf::from(query);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Read { path: path.clone(), source })?;
        debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.txt");
        std::fs::write(&path, "Production: 1696.92 kWh").unwrap();

        let text = FileSource.fetch(path.to_str().unwrap()).await.unwrap();
        assert_eq!(text, "Production: 1696.92 kWh");
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let result = FileSource.fetch("/nonexistent/transcript.txt").await;
        assert!(matches!(result, Err(SourceError::Read { .. })));
    }
}
