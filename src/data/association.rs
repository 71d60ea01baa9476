// src/data/association.rs

//! Implement [`Association`], the one fact extracted from a USB plug event.

use std::fmt;

/// A computer name, e.g. `"DESKTOP-1A2B3C.corp.example.com"`.
pub type Host = String;
/// A USB device serial number, e.g. `"4C530001230512118262"`.
pub type Serial = String;

/// A (host, serial) pair; USB device `serial` was plugged into
/// computer `host`.
///
/// Created by a [`PlugProcessor`] after one event record passed parsing,
/// filtering and serial extraction. Never changed after creation.
///
/// [`PlugProcessor`]: crate::readers::plugprocessor::PlugProcessor
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Association {
    host: Host,
    serial: Serial,
}

/// All [`Association`s] from one input file, in the order of the records
/// in that file.
///
/// Duplicates are preserved; each is a separate plug event.
///
/// [`Association`s]: self::Association
pub type SourceSet = Vec<Association>;
/// The [`SourceSet`s] of all input files, in order of the input files.
///
/// [`SourceSet`s]: self::SourceSet
pub type SourceSets = Vec<SourceSet>;

impl Association {
    pub fn new(
        host: Host,
        serial: Serial,
    ) -> Association {
        Association { host, serial }
    }

    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    pub fn serial(&self) -> &str {
        self.serial.as_str()
    }
}

impl fmt::Display for Association {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{} -> {}", self.serial, self.host)
    }
}
