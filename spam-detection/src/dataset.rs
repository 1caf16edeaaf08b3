//! Labeled SMS dataset
//!
//! The dataset is a tab-separated file without header: `label<TAB>message`,
//! one message per line, labels being `spam` or `ham`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{DetectionError, Result};

/// Message class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Ham,
    Spam,
}

impl Label {
    /// Parse a raw dataset label; only "spam" and "ham" are accepted
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "spam" => Some(Label::Spam),
            "ham" => Some(Label::Ham),
            _ => None,
        }
    }

    /// Encoded class id: ham = 0, spam = 1
    pub fn class_id(self) -> u32 {
        match self {
            Label::Ham => 0,
            Label::Spam => 1,
        }
    }

    /// Inverse of [`Label::class_id`]
    pub fn from_class_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Label::Ham),
            1 => Some(Label::Spam),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the dataset as read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number
    pub line: usize,
    pub label: String,
    /// `None` when the line has no message column
    pub message: Option<String>,
}

/// A record whose label passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledMessage {
    pub label: Label,
    pub message: Option<String>,
}

/// Read the tab-separated dataset file
pub fn load_dataset(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("Failed to open {}: {}", path.display(), e))
    })?;
    read_records(file)
}

/// Parse tab-separated records from any reader
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 1);

        let mut fields = row.iter();
        let label = fields.next().unwrap_or_default().to_string();
        let rest: Vec<&str> = fields.collect();
        let message = if rest.is_empty() {
            None
        } else {
            Some(rest.join("\t"))
        };

        records.push(RawRecord { line, label, message });
    }

    Ok(records)
}

/// Validate labels; any label other than "spam"/"ham" fails the whole load
pub fn encode_labels(records: Vec<RawRecord>) -> Result<Vec<LabeledMessage>> {
    records
        .into_iter()
        .map(|record| match Label::parse(&record.label) {
            Some(label) => Ok(LabeledMessage {
                label,
                message: record.message,
            }),
            None => Err(DetectionError::InvalidLabel {
                line: record.line,
                label: record.label,
            }),
        })
        .collect()
}
