//! Uploaded images arrive as `data:<mime>;base64,<payload>` strings and are
//! stored under the media root. Only the path relative to that root is
//! persisted.

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{Error, Result};

#[derive(Debug, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn parse(value: &str) -> Result<Self> {
        let Some(rest) = value.strip_prefix("data:") else {
            crate::bail!("Image must be a base64 data URI");
        };
        let Some((header, payload)) = rest.split_once(',') else {
            crate::bail!("Image must be a base64 data URI");
        };
        let Some(mime) = header.strip_suffix(";base64") else {
            crate::bail!("Image must be base64 encoded");
        };
        if !mime.starts_with("image/") {
            crate::bail!("Unsupported image type {mime}");
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|_| Error::Invalid("Invalid base64 image payload".to_owned()))?;

        if bytes.is_empty() {
            crate::bail!("Image is empty");
        }

        Ok(Self {
            mime: mime.to_owned(),
            bytes,
        })
    }

    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            other => mime_guess::get_mime_extensions_str(other)
                .and_then(|exts| exts.first().copied())
                .unwrap_or("bin"),
        }
    }
}

/// Decodes `data` and writes it to `<root>/<dir>/<ulid>.<ext>`.
pub async fn save_data_uri(root: &Path, dir: &str, data: &str) -> Result<String> {
    let image = DataUri::parse(data)?;
    let relative = format!(
        "{dir}/{}.{}",
        ulid::Ulid::new().to_string().to_lowercase(),
        image.extension()
    );

    let path = root.join(&relative);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &image.bytes).await?;

    tracing::debug!(path = %path.display(), "image saved");

    Ok(relative)
}

/// Missing files are not an error.
pub async fn remove(root: &Path, relative: &str) -> Result<()> {
    let path: PathBuf = root.join(relative);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Best-effort `remove` for files whose database row is already gone or
/// points elsewhere. Failures are logged, not returned.
pub async fn discard(root: &Path, relative: &str) {
    if let Err(e) = remove(root, relative).await {
        tracing::warn!(path = relative, "failed to remove media file: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent png
    const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    #[test]
    fn parses_png_data_uri() {
        let image = DataUri::parse(PNG).unwrap();
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.extension(), "png");
        assert!(image.bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn rejects_plain_strings_and_non_images() {
        assert!(DataUri::parse("not an image").is_err());
        assert!(DataUri::parse("data:text/plain;base64,aGVsbG8=").is_err());
        assert!(DataUri::parse("data:image/png,raw").is_err());
        assert!(DataUri::parse("data:image/png;base64,@@@").is_err());
    }

    #[tokio::test]
    async fn save_and_remove() -> anyhow::Result<()> {
        let dir = temp_dir::TempDir::new()?;
        let relative = save_data_uri(dir.path(), "recipes/images", PNG).await?;

        assert!(relative.starts_with("recipes/images/"));
        assert!(relative.ends_with(".png"));
        assert!(dir.path().join(&relative).exists());

        remove(dir.path(), &relative).await?;
        assert!(!dir.path().join(&relative).exists());
        remove(dir.path(), &relative).await?;

        Ok(())
    }

    #[tokio::test]
    async fn discard_swallows_errors() -> anyhow::Result<()> {
        let dir = temp_dir::TempDir::new()?;
        tokio::fs::create_dir_all(dir.path().join("users/locked")).await?;

        assert!(remove(dir.path(), "users/locked").await.is_err());
        discard(dir.path(), "users/locked").await;
        discard(dir.path(), "users/missing.png").await;

        Ok(())
    }
}
