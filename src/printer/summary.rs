// src/printer/summary.rs

//! CLI option `--summary` printing functions.
//! Only used by `usbplugs.rs`.

use std::fmt;

use ::si_trace_print::defñ;

use crate::common::Count;
use crate::printer::graph::GraphDescription;
use crate::printer::printers::{
    print_colored_stderr,
    ColorChoice,
    COLOR_ERROR,
    COLOR_PATH,
};
use crate::readers::summary::Summary;

const OPT_SUMMARY_PRINT_INDENT1: &str = "  ";
const OPT_SUMMARY_PRINT_INDENT2: &str = "      ";

/// Print `value` normally if `predicate` returns `false`
/// else print `value` in color with the error color.
fn eprintln_display_color_error<T, F>(
    value: &T,
    predicate: F,
    color_choice: &ColorChoice,
) where
    F: Fn(&T) -> bool,
    T: fmt::Display,
{
    if !predicate(value) {
        eprintln!("{}", value);
    } else {
        let data = format!("{}", value);
        // printing errors about printing errors is not helpful
        #[allow(clippy::match_single_binding)]
        match print_colored_stderr(COLOR_ERROR, Some(*color_choice), data.as_bytes()) {
            _ => {}
        }
        eprintln!();
    }
}

/// Print the counts of a [`Summary`] (multiple lines).
///
/// [`Summary`]: crate::readers::summary::Summary
fn print_summary_counts(
    summary: &Summary,
    color_choice: &ColorChoice,
) {
    match summary.filesz {
        Some(filesz) => eprintln!("{}file size      : {}", OPT_SUMMARY_PRINT_INDENT2, filesz),
        None => eprintln!("{}file size      : unknown", OPT_SUMMARY_PRINT_INDENT2),
    }
    if summary.bytes_read != 0 {
        eprintln!("{}bytes read     : {}", OPT_SUMMARY_PRINT_INDENT2, summary.bytes_read);
    }
    eprintln!("{}records        : {}", OPT_SUMMARY_PRINT_INDENT2, summary.records);
    eprintln!("{}USB plug events: {}", OPT_SUMMARY_PRINT_INDENT2, summary.records_accepted);
    eprintln!("{}other events   : {}", OPT_SUMMARY_PRINT_INDENT2, summary.records_rejected);
    eprint!("{}malformed      : ", OPT_SUMMARY_PRINT_INDENT2);
    eprintln_display_color_error(&summary.records_malformed, |c: &Count| *c != 0, color_choice);
}

/// Print the summary of one processed file (multiple lines).
pub fn print_file_summary(
    summary: &Summary,
    color_choice: &ColorChoice,
) {
    defñ!("({:?})", summary.path);
    eprint!("File: ");
    #[allow(clippy::match_single_binding)]
    match print_colored_stderr(COLOR_PATH, Some(*color_choice), summary.path.as_bytes()) {
        _ => {}
    }
    eprintln!();
    match summary.filetype {
        Some(filetype) => eprintln!("{}filetype       : {}", OPT_SUMMARY_PRINT_INDENT2, filetype),
        None => eprintln!("{}filetype       : unknown", OPT_SUMMARY_PRINT_INDENT2),
    }
    print_summary_counts(summary, color_choice);
    if let Some(error) = &summary.error {
        eprint!("{}Processing Err : ", OPT_SUMMARY_PRINT_INDENT2);
        eprintln_display_color_error(error, |_| true, color_choice);
    }
}

/// Print the summary of every processed file, then a total of all files,
/// then the graph written.
pub fn print_summary(
    summaries: &[Summary],
    graph: Option<&GraphDescription>,
    color_choice: &ColorChoice,
) {
    defñ!("({} summaries)", summaries.len());
    eprintln!();
    eprintln!("Files:");
    let mut total = Summary::default();
    for summary in summaries.iter() {
        print_file_summary(summary, color_choice);
        total.add(summary);
    }
    eprintln!();
    eprintln!("Program Summary:\n");
    eprintln!("{}Files processed: {}", OPT_SUMMARY_PRINT_INDENT1, summaries.len());
    eprintln!("{}Total:", OPT_SUMMARY_PRINT_INDENT1);
    print_summary_counts(&total, color_choice);
    eprintln!("{}{}", OPT_SUMMARY_PRINT_INDENT2, total);
    match graph {
        Some(graph) => {
            eprintln!("{}Graph nodes    : {}", OPT_SUMMARY_PRINT_INDENT1, graph.nodes().len());
            eprintln!("{}Graph edges    : {}", OPT_SUMMARY_PRINT_INDENT1, graph.edges().len());
        }
        None => {
            eprintln!("{}Graph          : not written", OPT_SUMMARY_PRINT_INDENT1);
        }
    }
}
