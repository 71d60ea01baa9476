// src/printer/mod.rs

//! The `printer` module is for writing the graph of USB serial numbers to
//! hosts ([`GraphDescription`]), and for printing user-facing summaries
//! with color.
//!
//! [`GraphDescription`]: crate::printer::graph::GraphDescription

pub mod graph;
pub mod printers;
pub mod summary;
