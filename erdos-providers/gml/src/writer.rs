//! Serialises graphs and their annotations as GML.

use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use erdos_core::{AttributeValue, Graph, NodeAnnotations, NodeId};
use tracing::{info, instrument, warn};

use crate::{errors::GmlError, syntax::escape};

/// Writes graphs as GML.
///
/// Nodes receive sequential integer ids in insertion order and carry their
/// name as a quoted `label`. Stored attributes are written first, followed by
/// annotations; an annotation replaces a stored attribute of the same key.
/// Every value is written as quoted text. Keys are mapped onto the GML key
/// alphabet, and a key that clashes with an earlier one on the same node
/// gains a numeric suffix (`_2`, `_3`, ...).
///
/// # Examples
/// ```
/// use erdos_core::{Graph, NodeAnnotations, NodeId};
/// use erdos_providers_gml::GmlWriter;
///
/// let mut graph = Graph::with_node_count(2);
/// graph.add_edge(&NodeId::Int(0), &NodeId::Int(1))?;
/// let mut out = Vec::new();
/// GmlWriter::write_to(&graph, &NodeAnnotations::default(), &mut out)?;
/// let text = String::from_utf8(out).expect("GML output is ASCII");
/// assert!(text.contains("label \"1\""));
/// assert!(text.contains("source 0"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GmlWriter;

impl GmlWriter {
    /// Writes `graph` with `annotations` to `path`, replacing any existing
    /// file.
    ///
    /// # Errors
    /// [`GmlError::EmptyGraph`] when the graph has no nodes and
    /// [`GmlError::Write`] when the file cannot be created or written.
    pub fn write_path(
        graph: &Graph,
        annotations: &NodeAnnotations,
        path: impl AsRef<Path>,
    ) -> Result<(), GmlError> {
        write_file(graph, annotations, path.as_ref())
    }

    /// Writes `graph` with `annotations` to `out`.
    ///
    /// # Errors
    /// [`GmlError::EmptyGraph`] when the graph has no nodes and
    /// [`GmlError::Io`] when writing fails.
    pub fn write_to<W: Write>(
        graph: &Graph,
        annotations: &NodeAnnotations,
        out: W,
    ) -> Result<(), GmlError> {
        if graph.is_empty() {
            return Err(GmlError::EmptyGraph);
        }
        emit(graph, annotations, out)?;
        Ok(())
    }
}

#[instrument(name = "gml.write", skip_all, fields(path = %path.display()))]
fn write_file(graph: &Graph, annotations: &NodeAnnotations, path: &Path) -> Result<(), GmlError> {
    if graph.is_empty() {
        return Err(GmlError::EmptyGraph);
    }
    let wrap = |source: io::Error| GmlError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(wrap)?;
    emit(graph, annotations, BufWriter::new(file)).map_err(wrap)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        annotated = annotations.len(),
        "saved graph"
    );
    Ok(())
}

fn emit<W: Write>(graph: &Graph, annotations: &NodeAnnotations, mut out: W) -> io::Result<()> {
    let mut ids: HashMap<&NodeId, usize> = HashMap::with_capacity(graph.node_count());
    writeln!(out, "graph [")?;
    for (id, node) in graph.nodes().enumerate() {
        ids.insert(node, id);
        writeln!(out, "  node [")?;
        writeln!(out, "    id {id}")?;
        writeln!(out, "    label \"{}\"", escape(&node.to_string()))?;

        let mut used = HashSet::new();
        let derived = annotations.get(node);
        let stored = graph
            .attributes(node)
            .into_iter()
            .flatten()
            .filter(|(key, _)| derived.is_none_or(|d| !d.contains_key(key.as_str())));
        for (key, value) in stored.chain(derived.into_iter().flatten()) {
            write_value(&mut out, node, key, value, &mut used)?;
        }
        writeln!(out, "  ]")?;
    }
    for (left, right) in graph.edges() {
        let (Some(source), Some(target)) = (ids.get(left), ids.get(right)) else {
            continue;
        };
        writeln!(out, "  edge [")?;
        writeln!(out, "    source {source}")?;
        writeln!(out, "    target {target}")?;
        writeln!(out, "  ]")?;
    }
    writeln!(out, "]")?;
    out.flush()
}

fn write_value<W: Write>(
    out: &mut W,
    node: &NodeId,
    raw: &str,
    value: &AttributeValue,
    used: &mut HashSet<String>,
) -> io::Result<()> {
    let base = gml_key(raw);
    if base == "id" || base == "label" {
        return Ok(());
    }
    let mut key = base.clone();
    let mut suffix = 2_usize;
    while !used.insert(key.clone()) {
        key = format!("{base}_{suffix}");
        suffix += 1;
    }
    if key != base {
        warn!(%node, attribute = raw, %key, "attribute key clashes after sanitising; renamed");
    }
    writeln!(out, "    {key} \"{}\"", escape(&value.to_string()))
}

/// Maps an arbitrary attribute name onto the GML key alphabet.
fn gml_key(raw: &str) -> String {
    let mut key: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if !key.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        key.insert(0, '_');
    }
    key
}
