//! Image reference resolution: `data:` URLs and files under a root directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::Engine;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::{SceneError, SceneResult};

/// Turns an image `href` into decoded pixels.
pub trait ImageResolver {
    /// Fetch and decode the image referenced by `href`.
    fn resolve(&self, href: &str) -> SceneResult<PreparedImage>;
}

/// Resolves only `data:` URLs.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataUrlResolver;

impl ImageResolver for DataUrlResolver {
    fn resolve(&self, href: &str) -> SceneResult<PreparedImage> {
        let bytes = decode_data_url(href)?;
        decode_image(&bytes)
    }
}

/// Resolves `data:` URLs and document-relative file paths.
#[derive(Clone, Debug)]
pub struct FileResolver {
    root: PathBuf,
}

impl FileResolver {
    /// Resolve relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageResolver for FileResolver {
    fn resolve(&self, href: &str) -> SceneResult<PreparedImage> {
        if href.trim_start().starts_with("data:") {
            return DataUrlResolver.resolve(href);
        }
        let rel = normalize_rel_path(href.strip_prefix("file://").unwrap_or(href))?;
        let path = self.root.join(Path::new(&rel));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))?;
        decode_image(&bytes)
    }
}

/// Decode the payload of a `data:` URL.
///
/// Base64 payloads may contain whitespace; other payloads are percent-decoded.
pub fn decode_data_url(href: &str) -> SceneResult<Vec<u8>> {
    let href = href.trim();
    let rest = href
        .strip_prefix("data:")
        .ok_or_else(|| SceneError::validation("image reference is not a data: URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| SceneError::validation("data: URL is missing its ',' separator"))?;
    if header.split(';').any(|p| p.trim() == "base64") {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(compact)
            .context("decode base64 data: URL payload")?;
        Ok(bytes)
    } else {
        Ok(urlencoding::decode_binary(payload.as_bytes()).into_owned())
    }
}

/// Normalize and validate a document-relative image path.
///
/// The result uses `/` separators, drops `.` segments, and rejects absolute paths and parent
/// traversals (`..`).
pub fn normalize_rel_path(source: &str) -> SceneResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SceneError::validation("image paths must be relative"));
    }
    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SceneError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }
    if out.is_empty() {
        return Err(SceneError::validation("image path must contain a file name"));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
