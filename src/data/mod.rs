// src/data/mod.rs

//! The `data` module is specialized data containers for
//! [`EventRecord`]s and [`Association`]s.
//!
//! ## Definitions of data
//!
//! ### Record
//!
//! A "record" is a sequence of bytes in a file that:
//!
//! * begin after a prior "record" or the beginning of a file.
//! * end with the closing tag `</Event>` or the end of a file.
//!
//! A "record" is found by a [`RecordSplitter`]. It is presumed to be one
//! XML `<Event>` element from a Windows Event Log export.
//!
//! #### EventRecord
//!
//! An [`EventRecord`] is the few fields of a "record" that matter to this
//! program:
//!
//! * the `EventID`
//! * the `Provider` `Name`
//! * the `Computer`
//! * the `DeviceId` data values
//!
//! An `EventRecord` only lives while one "record" is parsed.
//!
//! #### Serial
//!
//! A "serial" is the trailing token of a USB device instance path found in
//! a `DeviceId` data value, e.g. given
//! `USB\VID_0781&PID_5567\4C530001230512118262` the "serial" is
//! `4C530001230512118262`. A "serial" is found by [`usb_serial`].
//!
//! ### Association
//!
//! An [`Association`] is a (computer, serial) pair meaning "this USB device
//! was plugged into this computer". One USB plug event record makes one
//! `Association`.
//!
//! All `Association`s from one file are a [`SourceSet`].
//!
//! <br/>
//!
//! Also see [_Overview of readers_].
//!
//! [_Overview of readers_]: crate::readers
//! [`RecordSplitter`]: crate::readers::recordsplitter::RecordSplitter
//! [`EventRecord`]: crate::data::event::EventRecord
//! [`usb_serial`]: crate::data::serial::usb_serial
//! [`Association`]: crate::data::association::Association
//! [`SourceSet`]: crate::data::association::SourceSet

pub mod association;
pub mod event;
pub mod serial;
