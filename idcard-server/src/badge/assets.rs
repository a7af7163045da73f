//! Badge asset resolution
//!
//! Turns locally stored image references (`/uploads/<name>`) into
//! `data:` URIs so the rendered HTML is self-contained and the headless
//! browser never reaches back to the server. Remote http(s) URLs pass
//! through untouched.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::{Component, Path, PathBuf};

/// Resolves image references against the server's public file root.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    public_dir: PathBuf,
}

impl AssetResolver {
    /// `public_dir` is the directory that `/uploads/...` paths are
    /// relative to.
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// Resolve an image reference to an `src`-ready string.
    ///
    /// - `http://` / `https://` URLs are returned unchanged.
    /// - `/`-relative paths are read from disk and inlined as base64
    ///   data URIs with the mime type guessed from the extension.
    /// - Unreadable or traversal-attempting paths yield `None`; the
    ///   template renders a placeholder instead.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Some(reference.to_string());
        }

        let relative = reference.trim_start_matches('/');
        let rel_path = Path::new(relative);
        if rel_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            tracing::warn!("Rejected asset path {reference}");
            return None;
        }

        let full = self.public_dir.join(rel_path);
        let bytes = match std::fs::read(&full) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("Badge asset {reference} unreadable: {e}");
                return None;
            }
        };

        let mime = mime_guess::from_path(&full).first_or_octet_stream();
        Some(format!("data:{mime};base64,{}", BASE64.encode(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_urls_pass_through() {
        let resolver = AssetResolver::new("/nonexistent");
        assert_eq!(
            resolver.resolve("https://example.org/logo.png").as_deref(),
            Some("https://example.org/logo.png")
        );
    }

    #[test]
    fn local_files_become_data_uris() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        std::fs::create_dir(&uploads).unwrap();
        std::fs::write(uploads.join("photo.png"), b"\x89PNG\r\n").unwrap();

        let resolver = AssetResolver::new(dir.path());
        let src = resolver.resolve("/uploads/photo.png").unwrap();
        assert!(src.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn missing_files_yield_none() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = AssetResolver::new(dir.path());
        assert!(resolver.resolve("/uploads/gone.png").is_none());
    }

    #[test]
    fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = AssetResolver::new(dir.path());
        assert!(resolver.resolve("/uploads/../../etc/passwd").is_none());
    }
}
