//! Document text extraction
//!
//! Reads plain text, markdown, and PDF files into plain text. Extraction is
//! infallible by contract: unsupported or unreadable files yield an empty
//! string and a warning, so a single bad file never aborts a folder-wide
//! ingestion.

use std::path::Path;

/// File extensions this pipeline ingests.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["txt", "md", "pdf"];

/// Check whether a path has a supported extension (case-insensitive).
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Extract plain text from a document.
///
/// Plain text and markdown are read verbatim with lenient decoding; PDFs go
/// through text extraction. Any failure yields an empty string.
pub fn read_document(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" | "md" => read_text_lenient(path),
        "pdf" => extract_pdf_text(path),
        _ => {
            tracing::warn!("Unsupported file type, skipping: {}", path.display());
            String::new()
        }
    }
}

/// Read a file as UTF-8, replacing invalid byte sequences instead of failing.
fn read_text_lenient(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Extract concatenated page text from a PDF.
fn extract_pdf_text(path: &Path) -> String {
    match pdf_extract::extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to extract PDF {}: {}", path.display(), e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("notes.txt")));
        assert!(is_supported(Path::new("README.md")));
        assert!(is_supported(Path::new("paper.PDF")));
        assert!(!is_supported(Path::new("image.png")));
        assert!(!is_supported(Path::new("no_extension")));
    }

    #[test]
    fn test_read_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "The sky is blue.").unwrap();
        assert_eq!(read_document(&path), "The sky is blue.");
    }

    #[test]
    fn test_read_md_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Title\n\nBody text.").unwrap();
        assert_eq!(read_document(&path), "# Title\n\nBody text.");
    }

    #[test]
    fn test_invalid_utf8_is_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        std::fs::write(&path, [b'o', b'k', 0xFF, b'!', b'\n']).unwrap();

        let text = read_document(&path);
        assert!(text.starts_with("ok"));
        assert!(text.contains('!'));
    }

    #[test]
    fn test_missing_file_yields_empty() {
        assert_eq!(read_document(&PathBuf::from("/nonexistent/a.txt")), "");
    }

    #[test]
    fn test_corrupt_pdf_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, "not really a pdf").unwrap();
        assert_eq!(read_document(&path), "");
    }

    #[test]
    fn test_unsupported_extension_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.png");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47]).unwrap();
        assert_eq!(read_document(&path), "");
    }
}
