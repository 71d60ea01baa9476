// src/readers/evtxreader.rs

//! Implements a [`EvtxReader`],
//! the driver of deriving XML event records from a
//! [Windows Event Log `.evtx` format] file using [`EvtxParser`].
//!
//! Sibling of [`RecordSplitter`]. A `.evtx` file is binary, so records are
//! not split on a delimiter; each record is rendered as XML by `EvtxParser`.
//!
//! [`EvtxReader`]: self::EvtxReader
//! [`EvtxParser`]: https://docs.rs/evtx/0.8.1/evtx/struct.EvtxParser.html
//! [Windows Event Log `.evtx` format]: https://github.com/libyal/libevtx/blob/main/documentation/Windows%20XML%20Event%20Log%20(EVTX).asciidoc
//! [`RecordSplitter`]: crate::readers::recordsplitter::RecordSplitter

use std::fmt;
use std::io::{
    Error,
    ErrorKind,
    Result,
};
use std::path::Path;

use ::evtx::EvtxParser;
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
    FileMetadata,
    FileOpenOptions,
    FileSz,
};

/// From private `evtx::evtx_record::RecordId`.
///
/// See <https://github.com/omerbenamram/evtx/issues/234>
pub type RecordId = u64;

/// A wrapper for using [`EvtxParser`] to read a [evtx format file].
///
/// Records are returned in file order. Unlike a log reader there is no
/// need to sort by timestamp; every record is examined once.
///
/// [`EvtxParser`]: https://docs.rs/evtx/0.8.1/evtx/struct.EvtxParser.html
/// [evtx format file]: https://github.com/libyal/libevtx/blob/main/documentation/Windows%20XML%20Event%20Log%20(EVTX).asciidoc
pub struct EvtxReader {
    /// The internal [`EvtxParser`] that does the heavy lifting.
    ///
    /// [`EvtxParser`]: https://docs.rs/evtx/0.8.1/evtx/struct.EvtxParser.html
    evtxparser: EvtxParser<File>,
    /// The [`FPath`] of the file being read.
    ///
    /// [`FPath`]: crate::common::FPath
    path: FPath,
    /// `Count` of records rendered by the `EvtxParser`.
    records_rendered: Count,
    /// `Count` of records the `EvtxParser` failed to render.
    records_failed: Count,
    /// File Size of the file being read in bytes.
    filesz: FileSz,
}

impl fmt::Debug for EvtxReader {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("EvtxReader")
            .field("Path", &self.path)
            .field("Records Rendered", &self.records_rendered)
            .field("Records Failed", &self.records_failed)
            .field("filesz", &self.filesz)
            .finish()
    }
}

/// One record from [`EvtxReader::process_records`]; the rendered XML or the
/// rendering error as a `String`.
///
/// Annoyingly, cannot [Clone `EvtxError`].
///
/// [Clone `EvtxError`]: https://github.com/omerbenamram/evtx/issues/234
pub type ResultEvtxRecord = std::result::Result<(RecordId, String), String>;

impl EvtxReader {
    /// Create a new `EvtxReader`.
    ///
    /// Opens the file. Any failure here is an `Error` for the entire file.
    pub fn new(path: FPath) -> Result<EvtxReader> {
        def1n!("({:?})", path);

        let path_std: &Path = Path::new(&path);
        let mut open_options = FileOpenOptions::new();
        def1o!("open_options.read(true).open({:?})", path_std);
        let file: File = match open_options
            .read(true)
            .open(path_std)
        {
            Result::Ok(val) => val,
            Result::Err(err) => {
                def1x!("return {:?}", err);
                return Err(err);
            }
        };
        let metadata: FileMetadata = match file.metadata() {
            Result::Ok(val) => val,
            Result::Err(err) => {
                def1x!("return {:?}", err);
                return Err(err);
            }
        };
        let filesz: FileSz = metadata.len() as FileSz;
        def1o!("filesz {:?}", filesz);

        // built without the `multithreading` feature; records are parsed
        // sequentially
        def1o!("EvtxParser::from_read_seek(…)");
        let evtxparser: EvtxParser<File> = match EvtxParser::from_read_seek(file) {
            Ok(evtxparser) => evtxparser,
            Err(err) => {
                def1x!("EvtxParser::from_read_seek Error, return {}", err);
                return Err(
                    Error::new(
                        ErrorKind::InvalidData,
                        format!("EvtxParser::from_read_seek({:?}): {}", path, err),
                    )
                );
            }
        };
        def1x!("return Ok(EvtxReader)");

        Ok(EvtxReader {
            evtxparser,
            path,
            records_rendered: 0,
            records_failed: 0,
            filesz,
        })
    }

    /// Render every record of the file as XML, in file order, passing each
    /// to `f`.
    ///
    /// Records are rendered one at a time; only one rendered record is held
    /// at a time.
    pub fn process_records<F>(
        &mut self,
        mut f: F,
    )
    where
        F: FnMut(ResultEvtxRecord),
    {
        defn!();
        let evtxparser = &mut self.evtxparser;
        for result in evtxparser.records() {
            match result {
                Ok(record) => {
                    self.records_rendered += 1;
                    f(Ok((record.event_record_id, record.data)));
                }
                Err(err) => {
                    self.records_failed += 1;
                    f(Err(err.to_string()));
                }
            }
        }
        defx!("{} records rendered, {} records failed", self.records_rendered, self.records_failed);
    }

    #[inline(always)]
    pub const fn path(&self) -> &FPath {
        &self.path
    }

    #[inline(always)]
    pub const fn filesz(&self) -> FileSz {
        self.filesz
    }
}
