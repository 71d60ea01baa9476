// src/readers/recordsplitter.rs

//! Implements [`RecordSplitter`] and [`Records`], the drivers of splitting
//! bytes into event records.
//!
//! A Windows Event Log XML export is a sequence of `<Event>…</Event>`
//! elements with no wrapping root element, and sometimes with NUL padding
//! between or after the elements. Each record is the bytes up to and
//! including the next [`RECORD_DELIMITER`].
//!
//! Splitting is done by the pure function [`split_record`]. The
//! [`RecordSplitter`] drives `split_record` over a buffer window filled from
//! a [`Read`]. [`Records`] drives [`record_at`] over an in-memory slice.
//!
//! [`Read`]: std::io::Read

use std::fmt;
use std::io::{
    Error,
    ErrorKind,
    Read,
};

use ::bstr::ByteSlice;
use ::lazy_static::lazy_static;
use ::memchr::memmem::Finder;
#[allow(unused_imports)]
use ::more_asserts::{
    assert_le,
    debug_assert_ge,
    debug_assert_le,
    debug_assert_lt,
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
    Bytes,
    Count,
    ResultS3,
};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;

/// Size of a record in bytes.
pub type RecordSz = usize;

/// The closing tag that ends every event record.
pub const RECORD_DELIMITER: &[u8] = b"</Event>";
/// Length of [`RECORD_DELIMITER`].
pub const RECORD_DELIMITER_LEN: RecordSz = RECORD_DELIMITER.len();

/// Default maximum record size, 32 MiB.
///
/// A record, or the gap before the next record, larger than this is
/// an error.
pub const RECORD_SZ_MAX_DEFAULT: RecordSz = 1024 * 1024 * 32;
/// Minimum allowed maximum record size. Must hold a [`RECORD_DELIMITER`].
pub const RECORD_SZ_MAX_MIN: RecordSz = RECORD_DELIMITER_LEN;

/// Bytes requested per `read` call.
const READ_SZ: RecordSz = 0x10000;

lazy_static! {
    static ref RECORD_DELIMITER_FINDER: Finder<'static> = {
        defñ!("lazy_static! RECORD_DELIMITER_FINDER::new()");

        Finder::new(RECORD_DELIMITER)
    };
}

/// Result of one [`split_record`].
///
/// Lengths are counted from the start of the data passed to `split_record`.
/// The record is always the first `len` bytes; the caller advances by `len`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Split {
    /// A record ending with [`RECORD_DELIMITER`] of this length.
    Record(RecordSz),
    /// End of stream; the remaining data of this length is the final record.
    Remainder(RecordSz),
    /// No delimiter yet; read more data. Scanning may resume at the offset.
    NeedMore(RecordSz),
    /// End of stream and no data remains.
    Done,
}

/// Find the next record at the beginning of `data`.
///
/// `skip` is an offset into `data` already known to hold no complete
/// [`RECORD_DELIMITER`]; it is the value of a prior `Split::NeedMore`.
/// `at_eof` is `true` when no more data will follow `data`.
///
/// Does not trim; see [`trim_record`].
pub fn split_record(
    data: &[u8],
    skip: RecordSz,
    at_eof: bool,
) -> Split {
    debug_assert_le!(skip, data.len(), "skip {} is past data len {}", skip, data.len());
    if let Some(at) = RECORD_DELIMITER_FINDER.find(&data[skip..]) {
        return Split::Record(skip + at + RECORD_DELIMITER_LEN);
    }
    if at_eof {
        if data.is_empty() {
            return Split::Done;
        }
        return Split::Remainder(data.len());
    }
    // a delimiter may straddle the end of `data`
    let resume: RecordSz = data
        .len()
        .saturating_sub(RECORD_DELIMITER_LEN - 1)
        .max(skip);

    Split::NeedMore(resume)
}

/// Find the record of `data` beginning at byte offset `at`.
///
/// Returns the record and the offset of the byte after it, or `None` when
/// `at` is the end of `data`.
pub fn record_at(
    data: &[u8],
    at: usize,
) -> Option<(&[u8], usize)> {
    if at >= data.len() {
        return None;
    }
    match split_record(&data[at..], 0, true) {
        Split::Record(len) | Split::Remainder(len) => Some((&data[at..at + len], at + len)),
        Split::NeedMore(_) | Split::Done => None,
    }
}

/// Is `c` trimmed from the ends of a record?
#[inline(always)]
fn is_record_padding(c: char) -> bool {
    c.is_whitespace() || c == '\0'
}

/// Byte offsets, beginning and end, of `record` without surrounding
/// whitespace and NUL padding.
///
/// Returns `None` if nothing remains.
pub fn trim_record_bounds(record: &[u8]) -> Option<(usize, usize)> {
    let beg: usize = record.len() - record.trim_start_with(is_record_padding).len();
    let end: usize = record.trim_end_with(is_record_padding).len();
    if beg >= end {
        return None;
    }

    Some((beg, end))
}

/// Trim surrounding whitespace and NUL padding from a `record`.
///
/// Returns `None` if nothing remains.
pub fn trim_record(record: &[u8]) -> Option<&[u8]> {
    trim_record_bounds(record).map(|(beg, end)| &record[beg..end])
}

/// Iterator of the untrimmed records of an in-memory slice.
///
/// Restartable at any offset with [`Records::new_at`].
#[derive(Clone, Debug)]
pub struct Records<'a> {
    data: &'a [u8],
    at: usize,
}

impl<'a> Records<'a> {
    pub fn new(data: &'a [u8]) -> Records<'a> {
        Records::new_at(data, 0)
    }

    pub fn new_at(
        data: &'a [u8],
        at: usize,
    ) -> Records<'a> {
        Records { data, at }
    }

    /// Byte offset of the next record.
    pub const fn offset(&self) -> usize {
        self.at
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (record, at_next) = record_at(self.data, self.at)?;
        self.at = at_next;

        Some(record)
    }
}

/// Splits the bytes of a [`Read`] into trimmed event records.
///
/// Holds one buffer that grows up to `record_sz_max` bytes. The buffer is
/// released once the reader is exhausted.
///
/// A `RecordSplitter` does not implement [`Iterator`]; records borrow from
/// the internal buffer. Call [`next_record`] until it returns `Done`.
///
/// [`Read`]: std::io::Read
/// [`next_record`]: RecordSplitter::next_record
pub struct RecordSplitter<R: Read> {
    reader: R,
    /// Window of bytes read from `reader`; `buffer[beg..]` is not yet
    /// returned as a record.
    buffer: Bytes,
    beg: usize,
    /// Offset from `beg` where the delimiter search resumes.
    skip: RecordSz,
    at_eof: bool,
    record_sz_max: RecordSz,
    /// Total bytes read from `reader`.
    bytes_read: Count,
    /// Count of records returned, excluding those empty after trimming.
    records: Count,
}

impl<R: Read> fmt::Debug for RecordSplitter<R> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("RecordSplitter")
            .field("buffer.len", &self.buffer.len())
            .field("beg", &self.beg)
            .field("skip", &self.skip)
            .field("at_eof", &self.at_eof)
            .field("record_sz_max", &self.record_sz_max)
            .field("bytes_read", &self.bytes_read)
            .field("records", &self.records)
            .finish()
    }
}

/// Result of [`RecordSplitter::next_record`].
pub type ResultNextRecord<'a> = ResultS3<&'a [u8], Error>;

impl<R: Read> RecordSplitter<R> {
    /// Create a new `RecordSplitter`.
    ///
    /// `record_sz_max` below [`RECORD_SZ_MAX_MIN`] is raised to it.
    pub fn new(
        reader: R,
        record_sz_max: RecordSz,
    ) -> RecordSplitter<R> {
        def1ñ!("(…, {})", record_sz_max);
        RecordSplitter {
            reader,
            buffer: Bytes::with_capacity(0),
            beg: 0,
            skip: 0,
            at_eof: false,
            record_sz_max: record_sz_max.max(RECORD_SZ_MAX_MIN),
            bytes_read: 0,
            records: 0,
        }
    }

    /// Return the next trimmed record.
    ///
    /// Records that are empty after trimming are skipped. Returns `Done`
    /// once the reader is exhausted. Returns `Err` for a read error or
    /// when `record_sz_max` bytes are buffered without a delimiter.
    pub fn next_record(&mut self) -> ResultNextRecord<'_> {
        defn!();
        loop {
            let split: Split = split_record(&self.buffer[self.beg..], self.skip, self.at_eof);
            defo!("split {:?}", split);
            match split {
                Split::Record(len) | Split::Remainder(len) => {
                    let beg: usize = self.beg;
                    self.beg += len;
                    self.skip = 0;
                    let (trim_beg, trim_end) = match trim_record_bounds(&self.buffer[beg..beg + len]) {
                        Some(bounds) => bounds,
                        None => {
                            defo!("record at {} is empty after trim", beg);
                            continue;
                        }
                    };
                    self.records += 1;
                    let record: &[u8] = &self.buffer[beg + trim_beg..beg + trim_end];
                    #[cfg(any(debug_assertions, test))]
                    defx!("return Found({:?})", buffer_to_String_noraw(&record[..record.len().min(64)]));

                    return ResultS3::Found(record);
                }
                Split::Done => {
                    // release the buffer
                    self.buffer = Bytes::with_capacity(0);
                    self.beg = 0;
                    defx!("return Done");

                    return ResultS3::Done;
                }
                Split::NeedMore(skip) => {
                    self.skip = skip;
                    if let Err(err) = self.fill() {
                        defx!("return Err({})", err);
                        return ResultS3::Err(err);
                    }
                }
            }
        }
    }

    /// Read more data into the buffer.
    ///
    /// Consumed bytes before `beg` are dropped first.
    fn fill(&mut self) -> std::io::Result<()> {
        if self.beg > 0 {
            self.buffer.drain(..self.beg);
            self.beg = 0;
        }
        let pending: RecordSz = self.buffer.len();
        if pending >= self.record_sz_max {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!(
                    "no record delimiter {:?} within {} bytes; maximum record size is {} bytes",
                    RECORD_DELIMITER.as_bstr(), pending, self.record_sz_max,
                ),
            ));
        }
        let want: RecordSz = READ_SZ.min(self.record_sz_max - pending);
        self.buffer.resize(pending + want, 0);
        let read: usize = loop {
            match self.reader.read(&mut self.buffer[pending..]) {
                Ok(read) => break read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.buffer.truncate(pending);
                    return Err(err);
                }
            }
        };
        self.buffer.truncate(pending + read);
        self.bytes_read += read as Count;
        if read == 0 {
            self.at_eof = true;
        }
        def1o!("read {} bytes, buffer.len {}, at_eof {}", read, self.buffer.len(), self.at_eof);

        Ok(())
    }

    /// `Count` of bytes read from the reader.
    #[inline(always)]
    pub const fn bytes_read(&self) -> Count {
        self.bytes_read
    }

    /// `Count` of records returned by `next_record`.
    #[inline(always)]
    pub const fn count_records(&self) -> Count {
        self.records
    }

    #[inline(always)]
    pub const fn record_sz_max(&self) -> RecordSz {
        self.record_sz_max
    }
}
