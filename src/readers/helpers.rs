// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_.

#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{
    FPath,
    FileType,
};

/// File name extension of a [Windows Event Log `.evtx` format] file,
/// compared without regard to case.
///
/// [Windows Event Log `.evtx` format]: https://github.com/libyal/libevtx/blob/main/documentation/Windows%20XML%20Event%20Log%20(EVTX).asciidoc
pub const EXTENSION_EVTX: &str = "evtx";

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &std::path::Path {
    std::path::Path::new(path)
}

/// Return the `FileType` of a file by its name.
///
/// A file named `*.evtx` (any case) is `FileType::Evtx`. Every other file
/// is presumed to be an XML export, `FileType::Xml`.
pub fn fpath_to_filetype(path: &FPath) -> FileType {
    let filetype = match fpath_to_path(path).extension() {
        Some(ext) if ext.to_string_lossy().eq_ignore_ascii_case(EXTENSION_EVTX) => FileType::Evtx,
        _ => FileType::Xml,
    };
    defñ!("({:?}) return {:?}", path, filetype);

    filetype
}
