// src/readers/summary.rs

//! Implements `Summary` statistics tracking struct.

use std::fmt;

#[allow(unused_imports)]
use ::more_asserts::{
    debug_assert_ge,
    debug_assert_le,
};

use crate::common::{
    Count,
    FPath,
    FileSz,
    FileType,
};

/// Accumulated statistics about processing activity of a single file
/// processed by a [`PlugProcessor`].
///
/// For CLI option `--summary`.
///
/// [`PlugProcessor`]: crate::readers::plugprocessor::PlugProcessor
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// the `FPath` of the processed file
    pub path: FPath,
    /// the `FileType` of the processed file
    pub filetype: Option<FileType>,
    /// size of the file in bytes, if known
    pub filesz: Option<FileSz>,
    /// bytes read from the file, for XML files
    pub bytes_read: Count,
    /// records found in the file; split from XML or rendered from EVTX
    pub records: Count,
    /// records that are USB plug events, one [`Association`] each
    ///
    /// [`Association`]: crate::data::association::Association
    pub records_accepted: Count,
    /// records that are not USB plug events
    pub records_rejected: Count,
    /// records that are malformed
    pub records_malformed: Count,
    /// The first encountered [`Error`] for the entire file, if any, as a
    /// `String`.
    ///
    /// Annoyingly, cannot [Clone or Copy `Error`].
    ///
    /// [`Error`]: std::io::Error
    /// [Clone or Copy `Error`]: https://github.com/rust-lang/rust/issues/24135
    pub error: Option<String>,
}

impl Summary {
    /// Create a new `Summary` with counts of zero.
    pub fn new(
        path: FPath,
        filetype: FileType,
    ) -> Summary {
        Summary {
            path,
            filetype: Some(filetype),
            ..Default::default()
        }
    }

    /// Add counts of `other` to `self`. For a total of many files.
    pub fn add(
        &mut self,
        other: &Summary,
    ) {
        self.filesz = match (self.filesz, other.filesz) {
            (Some(a), Some(b)) => Some(a + b),
            (a, b) => a.or(b),
        };
        self.bytes_read += other.bytes_read;
        self.records += other.records;
        self.records_accepted += other.records_accepted;
        self.records_rejected += other.records_rejected;
        self.records_malformed += other.records_malformed;
    }

    /// Every record was either accepted, rejected or malformed.
    pub fn is_balanced(&self) -> bool {
        self.records == self.records_accepted + self.records_rejected + self.records_malformed
    }
}

impl fmt::Display for Summary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        debug_assert_le!(self.records_accepted, self.records, "more records accepted than found");
        write!(
            f,
            "records: {}, accepted (USB plug events): {}, rejected: {}, malformed: {}",
            self.records, self.records_accepted, self.records_rejected, self.records_malformed,
        )
    }
}
