//! Class label table.

use std::fs;
use std::path::Path;

use crate::decoding::error::{DetectError, Result};

/// Ordered class names, index-aligned with the class-probability axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse one label per line; surrounding whitespace of the whole text is
    /// trimmed first.
    pub fn from_text(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DetectError::EmptyLabelTable);
        }
        Ok(Self::new(text.lines().map(str::trim_end)))
    }

    /// Read a newline-separated label file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.labels.get(class_id).map(String::as_str)
    }

    /// Label for `class_id`, or [`DetectError::LabelTableTooSmall`].
    pub fn lookup(&self, class_id: usize) -> Result<&str> {
        self.get(class_id).ok_or(DetectError::LabelTableTooSmall {
            class_id,
            len: self.labels.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
