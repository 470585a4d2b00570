use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// URL prefix under which the upload directory is served.
pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Upload I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores profile pictures on local disk.
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

    /// Writes `bytes` and returns the public reference (`/uploads/<file>`).
    ///
    /// Files are named after the current unix time in milliseconds plus the
    /// original extension; a name clash within the same millisecond gets a
    /// random suffix instead of overwriting.
    pub async fn save(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let ext = original_name.map(extension_of).unwrap_or_default();
        let millis = chrono::Utc::now().timestamp_millis();

        let primary = format!("{}{}", millis, ext);
        let filename = match self.write_new(&primary, bytes).await {
            Ok(()) => primary,
            Err(UploadError::Io(e)) if e.kind() == ErrorKind::AlreadyExists => {
                let suffix = Uuid::new_v4().simple().to_string();
                let fallback = format!("{}-{}{}", millis, &suffix[..8], ext);
                self.write_new(&fallback, bytes).await?;
                fallback
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(file = %filename, size = bytes.len(), "stored profile picture");
        Ok(format!("{}/{}", UPLOADS_ROUTE, filename))
    }

    /// Best-effort removal of a previously saved upload, e.g. after the
    /// registration it belonged to was rejected.
    pub async fn discard(&self, reference: &str) {
        let Some(filename) = reference
            .strip_prefix(UPLOADS_ROUTE)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| {
                !name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.')
            })
        else {
            return;
        };

        if let Err(e) = tokio::fs::remove_file(self.dir.join(filename)).await {
            tracing::warn!(file = %filename, error = %e, "failed to discard upload");
        }
    }

    async fn write_new(&self, filename: &str, bytes: &[u8]) -> Result<(), UploadError> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.dir.join(filename))
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Lower-cased `.ext` of the client-supplied name, or empty when it has none
/// or it is not a short alphanumeric extension.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("me.PNG"), ".png");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("noext"), "");
        assert_eq!(extension_of("weird.p/g"), "");
        assert_eq!(extension_of("../../etc/passwd"), "");
        assert_eq!(extension_of("evil.ph p"), "");
    }
}
