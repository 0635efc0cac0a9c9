use crate::error::Result;
use sha2::{Digest, Sha256};
use std::path::Path;

/// SHA-256 over the raw bytes of a file, as lowercase hex.
///
/// Used only as a content-equality check between template and installed
/// files, never for anything adversarial.
pub fn file_digest(path: &Path) -> Result<String> {
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(hex(&hasher.finalize()))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn digest_is_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, b"v1").unwrap();
        let first = file_digest(&path).unwrap();
        let second = file_digest(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn digest_differs_on_content_change() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        std::fs::write(&a, b"v1").unwrap();
        std::fs::write(&b, b"v1-custom").unwrap();
        assert_ne!(file_digest(&a).unwrap(), file_digest(&b).unwrap());
    }

    #[test]
    fn identical_content_same_digest_across_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        std::fs::write(&a, b"same bytes").unwrap();
        std::fs::write(&b, b"same bytes").unwrap();
        assert_eq!(file_digest(&a).unwrap(), file_digest(&b).unwrap());
    }

    #[test]
    fn missing_file_errors() {
        let dir = TempDir::new().unwrap();
        assert!(file_digest(&dir.path().join("nope.md")).is_err());
    }
}
