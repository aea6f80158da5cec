use std::io::Write;
use std::path::Path;
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

/// The fundamental edit primitive: a verified byte-span replacement inside an
/// in-memory document buffer.
///
/// Rewrite operations stage exactly one `SpanEdit` during their scan and apply
/// it after the scan has finished, so a failed scan never leaves the buffer
/// half-modified. Intelligence lives in span acquisition (the scoped event
/// scan), not in the application logic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "SpanEdit does nothing until apply_to() is called"]
pub struct SpanEdit {
    /// Starting byte offset (inclusive)
    pub byte_start: usize,
    /// Ending byte offset (exclusive)
    pub byte_end: usize,
    /// New text to insert at [byte_start, byte_end)
    pub new_text: String,
    /// Verification of what we expect to find before applying
    pub expected_before: EditVerification,
}

/// Verification strategy for edit safety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditVerification {
    /// Exact text match required
    ExactMatch(String),
    /// xxh3 hash of expected text (faster for large spans)
    Hash(u64),
}

impl EditVerification {
    /// Check if the provided text matches the verification criteria.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            EditVerification::ExactMatch(expected) => text == expected,
            EditVerification::Hash(expected_hash) => {
                let actual_hash = xxh3_64(text.as_bytes());
                actual_hash == *expected_hash
            }
        }
    }

    /// Create verification from text, using hash for text over 1KB.
    pub fn from_text(text: &str) -> Self {
        if text.len() > 1024 {
            EditVerification::Hash(xxh3_64(text.as_bytes()))
        } else {
            EditVerification::ExactMatch(text.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Before-text verification failed at byte {byte_start}")]
    BeforeTextMismatch {
        byte_start: usize,
        byte_end: usize,
        expected: String,
        found: String,
    },

    #[error("Invalid byte range: [{byte_start}, {byte_end}) in buffer of length {buffer_len}")]
    InvalidByteRange {
        byte_start: usize,
        byte_end: usize,
        buffer_len: usize,
    },

    #[error("Byte offset {0} is not a character boundary")]
    NotCharBoundary(usize),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of applying an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "EditResult should be checked for applied/already-applied"]
pub enum EditResult {
    /// Edit was successfully applied
    Applied { bytes_changed: usize },
    /// Edit was already applied (current text matches new_text)
    AlreadyApplied,
}

impl SpanEdit {
    /// Create a new edit with automatic verification generation.
    pub fn new(
        byte_start: usize,
        byte_end: usize,
        new_text: impl Into<String>,
        expected_before: &str,
    ) -> Self {
        Self {
            byte_start,
            byte_end,
            new_text: new_text.into(),
            expected_before: EditVerification::from_text(expected_before),
        }
    }

    /// Validate the edit against the buffer and return the current span text.
    fn validate<'a>(&self, content: &'a str) -> Result<&'a str, EditError> {
        if self.byte_start > self.byte_end || self.byte_end > content.len() {
            return Err(EditError::InvalidByteRange {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                buffer_len: content.len(),
            });
        }
        for offset in [self.byte_start, self.byte_end] {
            if !content.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary(offset));
            }
        }

        let current = &content[self.byte_start..self.byte_end];

        // Idempotency: re-applying the same replacement is not a mismatch
        if current == self.new_text {
            return Ok(current);
        }

        if !self.expected_before.matches(current) {
            return Err(EditError::BeforeTextMismatch {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                expected: format!("{:?}", self.expected_before),
                found: current.to_string(),
            });
        }

        Ok(current)
    }

    /// Apply this edit to the buffer in place.
    ///
    /// Validation runs before any mutation; on error the buffer is untouched.
    pub fn apply_to(&self, content: &mut String) -> Result<EditResult, EditError> {
        let current = self.validate(content)?;
        if current == self.new_text {
            return Ok(EditResult::AlreadyApplied);
        }

        content.replace_range(self.byte_start..self.byte_end, &self.new_text);
        Ok(EditResult::Applied {
            bytes_changed: self.new_text.len(),
        })
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or the existing file is left unchanged.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), EditError> {
    // Tempfile in the same directory so the rename stays on one filesystem
    let parent = path.parent().ok_or_else(|| {
        EditError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        ))
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    let now = filetime::FileTime::now();
    filetime::set_file_mtime(path, now)?;

    Ok(())
}
