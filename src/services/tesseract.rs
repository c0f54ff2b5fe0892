use crate::services::collaborators::{CollaboratorError, TextExtractor};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Text extractor backed by the `tesseract` command line tool
///
/// The image is streamed on stdin and the recognised text read from stdout,
/// so nothing touches the filesystem.
#[derive(Debug, Clone)]
pub struct TesseractExtractor {
    binary: PathBuf,
    language: String,
}

impl TesseractExtractor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            language: "eng".to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    async fn extract_text(&self, image: &[u8]) -> Result<String, CollaboratorError> {
        let mut child = Command::new(&self.binary)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CollaboratorError::Spawn {
                program: self.binary.display().to_string(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CollaboratorError::ServiceError("tesseract stdin not captured".into()))?;

        // Feed stdin from a separate task so a full stdout pipe cannot stall us
        let input = image.to_vec();
        let writer = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await?;

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("tesseract closed stdin early: {}", e),
            Err(e) => tracing::warn!("tesseract stdin writer panicked: {}", e),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CollaboratorError::ServiceError(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!("tesseract extracted {} characters", text.len());

        Ok(text)
    }
}
