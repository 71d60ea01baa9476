// src/bin/usbplugs.rs

//! Driver program _usbplugs_ drives the [_usbplugslib_].
//!
//! Processes user-passed command-line arguments.
//! Then processes each path passed, in order, one at a time.
//! A path named `*.evtx` is read with an [`EvtxReader`], any other path is
//! presumed to be an XML export and is read with a [`RecordSplitter`].
//! Either way a [`PlugProcessor`] drives the processing of one file.
//!
//! The [`Association`s] of all files are written to the `--dotfile` as
//! one [`GraphDescription`].
//!
//! A file that cannot be read stops the program. A file without USB plug
//! events is noted and skipped.
//!
//! If passed CLI option `--summary`, prints a [`Summary`] about each file
//! processed, and a total.
//!
//! [_usbplugslib_]: usbplugslib
//! [`EvtxReader`]: usbplugslib::readers::evtxreader::EvtxReader
//! [`RecordSplitter`]: usbplugslib::readers::recordsplitter::RecordSplitter
//! [`PlugProcessor`]: usbplugslib::readers::plugprocessor::PlugProcessor
//! [`Association`s]: usbplugslib::data::association::Association
//! [`GraphDescription`]: usbplugslib::printer::graph::GraphDescription
//! [`Summary`]: usbplugslib::readers::summary::Summary

#![allow(non_camel_case_types)]

use std::process::ExitCode;

use ::anyhow::Context;
use ::clap::{
    Parser,
    ValueEnum,
};
use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use ::usbplugslib::common::{
    FPath,
    FPaths,
    FileType,
    ResultS3,
};
use ::usbplugslib::data::association::SourceSets;
#[allow(unused_imports)]
use ::usbplugslib::debug::printers::{
    de_err,
    de_wrn,
    e_err,
    e_wrn,
};
use ::usbplugslib::printer::graph::GraphDescription;
use ::usbplugslib::printer::printers::ColorChoice;
use ::usbplugslib::printer::summary::print_summary;
use ::usbplugslib::readers::helpers::fpath_to_filetype;
use ::usbplugslib::readers::plugprocessor::PlugProcessor;
use ::usbplugslib::readers::recordsplitter::{
    RecordSz,
    RECORD_SZ_MAX_DEFAULT,
    RECORD_SZ_MAX_MIN,
};
use ::usbplugslib::readers::summary::Summary;

// --------------------
// command-line parsing

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

const CLI_HELP_AFTER: &str = concatcp!(
    "Input files named \"*.evtx\" are read as Windows Event Log files.
Other input files are read as UTF-8 XML exports of concatenated <Event>
records with no wrapping root element, as written by
\"wevtutil qe Security /f:xml\".

Only events with EventID 6416 and Provider \"Microsoft-Windows-Security-Auditing\"
are examined. The written DOTFILE may be rendered by Graphviz, e.g.

    dot -Tsvg -o usbplugs.svg DOTFILE

",
    "RECORD_SIZE_MAX default is ", RECORD_SZ_MAX_DEFAULT, " bytes, minimum is ", RECORD_SZ_MAX_MIN, " bytes.",
);

// * other `clap::App` options <https://docs.rs/clap/latest/clap/struct.App.html>
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "usbplugs",
    // write expanded information for the `--version` output
    version = concatcp!(
        "\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of Windows Security event log files, XML exports or .evtx.
    /// Files are processed in the order passed.
    #[clap(
        required = true,
        verbatim_doc_comment,
    )]
    paths: Vec<String>,

    /// Path of the Graphviz DOT file to write.
    /// An existing file is overwritten.
    #[clap(
        required = true,
        short = 'd',
        long,
        verbatim_doc_comment,
    )]
    dotfile: String,

    /// Maximum size in bytes of one event record of an XML export.
    /// A file with a larger record stops the program.
    /// May pass value as decimal or hexadecimal (prefix "0x").
    #[clap(
        required = false,
        short = 'm',
        long,
        verbatim_doc_comment,
        default_value_t = RECORD_SZ_MAX_DEFAULT,
        value_parser = cli_process_record_size_max,
    )]
    record_size_max: RecordSz,

    /// Choose to print using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Print a summary of files processed to stderr.
    #[clap(
        short,
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// `clap` argument processor for `--record-size-max`.
/// This implementation, as opposed to clap built-in number parsing, allows
/// the user to pass a hexadecimal number, e.g. "0x2000000".
fn cli_process_record_size_max(value: &str) -> std::result::Result<RecordSz, String> {
    let errs = format!("Unable to parse a number for --record-size-max {:?}", value);
    let record_sz: RecordSz = match value.strip_prefix("0x") {
        Some(hex) => match RecordSz::from_str_radix(hex, 16) {
            Ok(val) => val,
            Err(err) => return Err(format!("{} {}", errs, err)),
        },
        None => match value.parse::<RecordSz>() {
            Ok(val) => val,
            Err(err) => return Err(format!("{} {}", errs, err)),
        },
    };
    if record_sz < RECORD_SZ_MAX_MIN {
        return Err(format!(
            "--record-size-max must be ≥ {}, it was {:?}",
            RECORD_SZ_MAX_MIN, value
        ));
    }

    Ok(record_sz)
}

// --------------------
// processing

/// Process each path in order. Return the `SourceSets` of paths with USB
/// plug events.
///
/// Any `Err` of a path stops processing.
fn process_paths(
    paths: &FPaths,
    record_sz_max: RecordSz,
    summaries: &mut Vec<Summary>,
) -> anyhow::Result<SourceSets> {
    defn!("({} paths)", paths.len());
    let mut sourcesets = SourceSets::with_capacity(paths.len());
    for path in paths.iter() {
        let filetype: FileType = fpath_to_filetype(path);
        defo!("path {:?} filetype {:?}", path, filetype);
        let mut plugprocessor = PlugProcessor::new(path.clone(), filetype, record_sz_max);
        let result = plugprocessor.process();
        summaries.push(plugprocessor.summary().clone());
        match result {
            ResultS3::Found(sourceset) => {
                defo!("found {} associations in {:?}", sourceset.len(), path);
                sourcesets.push(sourceset);
            }
            ResultS3::Done => {
                e_wrn!("no USB plug events found in {:?}", path);
            }
            ResultS3::Err(err) => {
                defx!("process({:?}) error {}", path, err);
                return Err(err).with_context(|| format!("unable to process {} file {:?}", filetype, path));
            }
        }
    }
    defx!("{} sourcesets", sourcesets.len());

    Ok(sourcesets)
}

/// Process the paths then write the graph to `dotfile`.
fn run(
    paths: &FPaths,
    dotfile: &FPath,
    record_sz_max: RecordSz,
    summaries: &mut Vec<Summary>,
) -> anyhow::Result<GraphDescription> {
    let sourcesets: SourceSets = process_paths(paths, record_sz_max, summaries)?;
    let graph = GraphDescription::from_sets(&sourcesets);
    graph
        .write_path(dotfile)
        .with_context(|| format!("unable to write DOT file {:?}", dotfile))?;

    Ok(graph)
}

/// Process the user-passed command-line arguments.
/// Start function `run`.
/// Determine a process return code.
pub fn main() -> ExitCode {
    defn!();
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    // map `CLI_Color_Choice` to `ColorChoice`
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    let paths: FPaths = args.paths;

    let mut summaries: Vec<Summary> = Vec::with_capacity(paths.len());
    let (exitcode, graph) = match run(&paths, &args.dotfile, args.record_size_max, &mut summaries) {
        Ok(graph) => (ExitCode::SUCCESS, Some(graph)),
        Err(err) => {
            e_err!("{:#}", err);
            (ExitCode::FAILURE, None)
        }
    };

    if args.summary {
        print_summary(&summaries, graph.as_ref(), &color_choice);
    }
    defx!("exitcode {:?}", exitcode);

    exitcode
}
