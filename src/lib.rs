// src/lib.rs

//! _usbplugslib_ is the library used by the program _usbplugs_.
//!
//! _usbplugs_ reads Windows Security-Audit event logs, XML exports or
//! `.evtx` files, and finds the USB device plug-in events (Event ID 6416).
//! Each event associates a USB device serial number with the computer it
//! was plugged into. All associations are written as one directed graph in
//! the [Graphviz DOT language].
//!
//! ## Overview
//!
//! * [`RecordSplitter`] splits an XML export into event records.
//! * [`EvtxReader`] renders the records of a `.evtx` file as XML.
//! * [`parse_event`] parses one event record, maybe returning an
//!   [`Association`].
//! * [`PlugProcessor`] drives the above for one file.
//! * [`GraphDescription`] writes the associations of all files.
//!
//! [Graphviz DOT language]: https://graphviz.org/doc/info/lang.html
//! [`RecordSplitter`]: crate::readers::recordsplitter::RecordSplitter
//! [`EvtxReader`]: crate::readers::evtxreader::EvtxReader
//! [`parse_event`]: crate::data::event::parse_event
//! [`Association`]: crate::data::association::Association
//! [`PlugProcessor`]: crate::readers::plugprocessor::PlugProcessor
//! [`GraphDescription`]: crate::printer::graph::GraphDescription

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
