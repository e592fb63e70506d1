//! Sliding-window text chunking
//!
//! Splits document text into fixed-size, overlapping windows. Windows are
//! measured in characters, not bytes, so multi-byte text never splits inside
//! a UTF-8 sequence.

use crate::error::ChunkingError;

/// Splits text into fixed-size overlapping windows.
///
/// Window `i` starts at `i * (size - overlap)` characters and spans `size`
/// characters, clipped to the text length. Windows whose trimmed content is
/// empty are skipped.
#[derive(Debug)]
pub struct TextChunker {
    size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a chunker, validating that `size` exceeds `overlap`.
    ///
    /// The iteration step is `size - overlap`; a non-positive step would
    /// never advance, so it is rejected here rather than looped on.
    pub fn new(size: usize, overlap: usize) -> Result<Self, ChunkingError> {
        if size == 0 || overlap >= size {
            return Err(ChunkingError::InvalidWindow { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split `text` into chunks. Empty input yields an empty Vec.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let step = self.size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.size).min(chars.len());
            let window: String = chars[start..end].iter().collect();

            // Skip pure-whitespace windows
            if !window.trim().is_empty() {
                chunks.push(window);
            }

            start += step;
        }

        chunks
    }
}

/// Convenience wrapper: validate the window parameters and chunk in one call.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<String>, ChunkingError> {
    Ok(TextChunker::new(size, overlap)?.chunk(text))
}
