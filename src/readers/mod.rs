// src/readers/mod.rs

//! "Readers" for _usbplugslib_.
//!
//! ## Overview of readers
//!
//! * A [`PlugProcessor`] drives a [`RecordSplitter`] or an [`EvtxReader`]
//!   to derive event records, one [`PlugProcessor`] per file.
//! * A `RecordSplitter` splits the bytes of an XML export into records.
//! * An `EvtxReader` renders the records of a `.evtx` file as XML.
//! * Each record is parsed by [`parse_event`] to maybe derive an
//!   [`Association`].
//!
//! <br/>
//!
//! A `RecordSplitter` only handles `u8` bytes. Conversion to `str` happens
//! once per record in `parse_event`.
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`Association`]: crate::data::association::Association
//! [`parse_event`]: crate::data::event::parse_event
//! [`EvtxReader`]: crate::readers::evtxreader::EvtxReader
//! [`RecordSplitter`]: crate::readers::recordsplitter::RecordSplitter
//! [`PlugProcessor`]: crate::readers::plugprocessor::PlugProcessor

pub mod evtxreader;
pub mod helpers;
pub mod plugprocessor;
pub mod recordsplitter;
pub mod summary;
