// src/printer/graph.rs

//! Implements a [`GraphDescription`], the directed graph of USB serial
//! numbers to the hosts they were plugged into, written in the
//! [Graphviz DOT language].
//!
//! Given two sources of [`Association`s], `{(H1, S1), (H2, S1)}` and
//! `{(H3, S2)}`, the written graph is
//!
//! ```text
//! digraph USBPlugs{
//! 	"S1" [color=Red, fontcolor=Red, shape=box]
//! 	"S2" [color=Red, fontcolor=Red, shape=box]
//!
//! 	"S1" -> "H1";
//! 	"S1" -> "H2";
//! 	"S2" -> "H3";
//! }
//! ```
//!
//! There is no newline after the closing brace.
//!
//! [Graphviz DOT language]: https://graphviz.org/doc/info/lang.html
//! [`Association`s]: crate::data::association::Association

use std::io::{
    BufWriter,
    Result,
    Write,
};

use ::itertools::Itertools; // provides `unique`
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
    FPath,
    File,
};
use crate::data::association::{
    Association,
    Serial,
    SourceSet,
};
use crate::readers::helpers::fpath_to_path;

/// Name of the written `digraph`.
pub const GRAPH_NAME: &str = "USBPlugs";
/// Attributes of every serial number node.
pub const NODE_ATTRIBUTES: &str = "[color=Red, fontcolor=Red, shape=box]";

/// Quote `value` as a DOT string. A `\` within is escaped as `\\`, a `"`
/// within is escaped as `\"`.
pub fn dot_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');

    quoted
}

/// The nodes and edges of the graph.
///
/// Nodes are the unique serial numbers, in the order first observed across
/// all sources. Edges are every `Association`, in source order then record
/// order, including duplicates.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GraphDescription {
    nodes: Vec<Serial>,
    edges: Vec<Association>,
}

impl GraphDescription {
    /// Create a `GraphDescription` from the `SourceSet` of each source, in
    /// order processed.
    pub fn from_sets(sourcesets: &[SourceSet]) -> GraphDescription {
        defn!("({} sourcesets)", sourcesets.len());
        let edges: Vec<Association> = sourcesets
            .iter()
            .flatten()
            .cloned()
            .collect();
        let nodes: Vec<Serial> = edges
            .iter()
            .map(|association| association.serial())
            .unique()
            .map(Serial::from)
            .collect();
        defx!("{} nodes, {} edges", nodes.len(), edges.len());

        GraphDescription { nodes, edges }
    }

    pub fn nodes(&self) -> &[Serial] {
        self.nodes.as_slice()
    }

    pub fn edges(&self) -> &[Association] {
        self.edges.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Write the graph in the DOT language to `writer`.
    pub fn write<W: Write>(
        &self,
        writer: &mut W,
    ) -> Result<()> {
        writeln!(writer, "digraph {}{{", GRAPH_NAME)?;
        for serial in self.nodes.iter() {
            writeln!(writer, "\t{} {}", dot_quote(serial), NODE_ATTRIBUTES)?;
        }
        writeln!(writer)?;
        for association in self.edges.iter() {
            writeln!(
                writer,
                "\t{} -> {};",
                dot_quote(association.serial()),
                dot_quote(association.host()),
            )?;
        }
        write!(writer, "}}")?;

        Ok(())
    }

    /// Write the graph to a new `Vec<u8>`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer: Vec<u8> = Vec::with_capacity(64 + self.edges.len() * 48);
        // writing to a `Vec` does not fail
        #[allow(clippy::match_single_binding)]
        match self.write(&mut buffer) {
            _ => {}
        }

        buffer
    }

    /// Write the graph to the file at `path`, creating or truncating it.
    ///
    /// A partially written file is left as-is upon error.
    pub fn write_path(
        &self,
        path: &FPath,
    ) -> Result<()> {
        def1n!("({:?})", path);
        let file: File = match File::create(fpath_to_path(path)) {
            Ok(val) => val,
            Err(err) => {
                def1x!("File::create({:?}) error {}", path, err);
                return Err(err);
            }
        };
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        def1x!("wrote {} nodes, {} edges", self.nodes.len(), self.edges.len());

        Ok(())
    }
}
