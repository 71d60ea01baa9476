// src/readers/plugprocessor.rs

//! Implements a [`PlugProcessor`], the driver of deriving a [`SourceSet`]
//! of [`Association`s] from one file.
//!
//! For an XML file, a `PlugProcessor` drives a [`RecordSplitter`].
//! For an EVTX file, a `PlugProcessor` drives an [`EvtxReader`].
//! Either way, each record is passed to [`parse_event`].
//!
//! A malformed record is reported with a warning and skipped. A record that
//! is not a USB plug event is skipped silently; that is the fate of nearly
//! every record of a Security log.
//!
//! [`SourceSet`]: crate::data::association::SourceSet
//! [`Association`s]: crate::data::association::Association
//! [`RecordSplitter`]: crate::readers::recordsplitter::RecordSplitter
//! [`EvtxReader`]: crate::readers::evtxreader::EvtxReader
//! [`parse_event`]: crate::data::event::parse_event

use std::fmt;
use std::io::{
    Error,
    Read,
};

#[allow(unused_imports)]
use ::si_trace_print::{
    def1n,
    def1o,
    def1x,
    def1ñ,
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{
    Count,
    FPath,
    File,
    FileOpenOptions,
    FileType,
    ResultS3,
};
use crate::data::association::SourceSet;
use crate::data::event::{
    parse_event,
    ResultParseEvent,
};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;
#[allow(unused_imports)]
use crate::debug::printers::{
    de_err,
    de_wrn,
    e_err,
    e_wrn,
};
use crate::readers::evtxreader::{
    EvtxReader,
    ResultEvtxRecord,
};
use crate::readers::helpers::fpath_to_path;
use crate::readers::recordsplitter::{
    trim_record,
    RecordSplitter,
    RecordSz,
};
use crate::readers::summary::Summary;

/// Result of [`PlugProcessor::process`].
///
/// * `Found(SourceSet)` at least one USB plug event was found
/// * `Done` the file was processed but no USB plug events were found
/// * `Err(Error)` the file could not be read; the entire run should stop
pub type ResultProcess = ResultS3<SourceSet, Error>;

/// Derives the [`SourceSet`] of one file.
///
/// [`SourceSet`]: crate::data::association::SourceSet
pub struct PlugProcessor {
    /// The [`FPath`] of the file being processed.
    ///
    /// [`FPath`]: crate::common::FPath
    path: FPath,
    filetype: FileType,
    /// Maximum size of one record, for XML files.
    record_sz_max: RecordSz,
    summary: Summary,
}

impl fmt::Debug for PlugProcessor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("PlugProcessor")
            .field("Path", &self.path)
            .field("FileType", &self.filetype)
            .field("record_sz_max", &self.record_sz_max)
            .field("Summary", &self.summary)
            .finish()
    }
}

impl PlugProcessor {
    /// Create a new `PlugProcessor`.
    ///
    /// **NOTE:** does not attempt any file reads here; see [`process`].
    ///
    /// [`process`]: PlugProcessor::process
    pub fn new(
        path: FPath,
        filetype: FileType,
        record_sz_max: RecordSz,
    ) -> PlugProcessor {
        def1ñ!("({:?}, {:?}, {})", path, filetype, record_sz_max);
        let summary = Summary::new(path.clone(), filetype);

        PlugProcessor {
            path,
            filetype,
            record_sz_max,
            summary,
        }
    }

    /// Open and process the entire file.
    ///
    /// The file is closed before returning.
    pub fn process(&mut self) -> ResultProcess {
        def1n!("({:?})", self.path);
        let result = match self.filetype {
            FileType::Xml => {
                let mut open_options = FileOpenOptions::new();
                let file: File = match open_options
                    .read(true)
                    .open(fpath_to_path(&self.path))
                {
                    Ok(val) => val,
                    Err(err) => {
                        self.summary.error = Some(err.to_string());
                        def1x!("return Err({})", err);
                        return ResultS3::Err(err);
                    }
                };
                self.summary.filesz = file.metadata().ok().map(|m| m.len());
                self.process_reader(file)
            }
            FileType::Evtx => self.process_evtx(),
        };
        def1x!("({:?}) return {}", self.path, result);

        result
    }

    /// Process all records from `reader` as an XML export.
    ///
    /// `reader` is dropped before returning.
    pub fn process_reader<R: Read>(
        &mut self,
        reader: R,
    ) -> ResultProcess {
        defn!();
        let mut sourceset = SourceSet::new();
        let mut splitter = RecordSplitter::new(reader, self.record_sz_max);
        loop {
            match splitter.next_record() {
                ResultS3::Found(record) => {
                    self.summary.records += 1;
                    let index: Count = self.summary.records;
                    let result = parse_event(record);
                    self.process_result(index, result, &mut sourceset);
                }
                ResultS3::Done => break,
                ResultS3::Err(err) => {
                    self.summary.bytes_read = splitter.bytes_read();
                    self.summary.error = Some(err.to_string());
                    defx!("return Err({})", err);
                    return ResultS3::Err(err);
                }
            }
        }
        self.summary.bytes_read = splitter.bytes_read();
        defo!("{:?}", splitter);
        defx!("sourceset.len() {}", sourceset.len());

        self.finish(sourceset)
    }

    /// Process all records of an EVTX file.
    fn process_evtx(&mut self) -> ResultProcess {
        defn!();
        let mut evtxreader: EvtxReader = match EvtxReader::new(self.path.clone()) {
            Ok(val) => val,
            Err(err) => {
                self.summary.error = Some(err.to_string());
                defx!("return Err({})", err);
                return ResultS3::Err(err);
            }
        };
        self.summary.filesz = Some(evtxreader.filesz());
        let mut sourceset = SourceSet::new();
        evtxreader.process_records(|result: ResultEvtxRecord| {
            self.summary.records += 1;
            let index: Count = self.summary.records;
            match result {
                Ok((_record_id, data)) => {
                    defo!("EVTX EventRecordID {}", _record_id);
                    let result = match trim_record(data.as_bytes()) {
                        Some(record) => parse_event(record),
                        None => ResultS3::Done,
                    };
                    self.process_result(index, result, &mut sourceset);
                }
                Err(err) => {
                    self.summary.records_malformed += 1;
                    e_wrn!("failed to render EVTX record {} of {:?}: {}", index, self.path, err);
                }
            }
        });
        defx!("sourceset.len() {}", sourceset.len());

        self.finish(sourceset)
    }

    /// Count the `result` of one record; keep an `Association`.
    fn process_result(
        &mut self,
        index: Count,
        result: ResultParseEvent,
        sourceset: &mut SourceSet,
    ) {
        match result {
            ResultS3::Found(association) => {
                defo!("record {}: found {}", index, association);
                self.summary.records_accepted += 1;
                sourceset.push(association);
            }
            ResultS3::Done => {
                self.summary.records_rejected += 1;
            }
            ResultS3::Err(err) => {
                self.summary.records_malformed += 1;
                e_wrn!("failed to process Event record {} of {:?}: {}", index, self.path, err);
            }
        }
    }

    fn finish(
        &self,
        sourceset: SourceSet,
    ) -> ResultProcess {
        debug_assert!(self.summary.is_balanced(), "unbalanced {:?}", self.summary);
        if sourceset.is_empty() {
            return ResultS3::Done;
        }

        ResultS3::Found(sourceset)
    }

    #[inline(always)]
    pub const fn path(&self) -> &FPath {
        &self.path
    }

    #[inline(always)]
    pub const fn filetype(&self) -> FileType {
        self.filetype
    }

    /// The [`Summary`] of processing so far.
    ///
    /// [`Summary`]: crate::readers::summary::Summary
    pub const fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Helper to process one in-memory XML export.
///
/// `name` is only used in messages.
pub fn process_bytes(
    name: &str,
    data: &[u8],
    record_sz_max: RecordSz,
) -> (ResultProcess, Summary) {
    let mut plugprocessor = PlugProcessor::new(FPath::from(name), FileType::Xml, record_sz_max);
    #[cfg(any(debug_assertions, test))]
    defñ!("({:?}, {:?})", name, buffer_to_String_noraw(&data[..data.len().min(64)]));
    let result = plugprocessor.process_reader(data);
    let summary = plugprocessor.summary().clone();

    (result, summary)
}
