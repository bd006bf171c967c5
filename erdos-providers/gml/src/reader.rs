//! Interprets parsed GML as a simple undirected graph.

use std::{
    collections::HashMap,
    fs,
    io::{self, Read},
    path::Path,
};

use erdos_core::{AttributeValue, Graph, NodeId};
use tracing::{info, instrument};

use crate::{
    errors::GmlError,
    syntax::{self, Entry, Value},
};

/// Loads graphs from GML markup.
///
/// Node names come from `label` when present and from `id` otherwise; names
/// that parse as integers become [`NodeId::Int`]. Other scalar node keys are
/// kept as node attributes.
///
/// # Examples
/// ```
/// use erdos_core::NodeId;
/// use erdos_providers_gml::GmlReader;
///
/// let graph = GmlReader::read_str(
///     "graph [ node [ id 0 label \"a\" ] node [ id 1 ] edge [ source 0 target 1 ] ]",
/// )?;
/// assert!(graph.contains_edge(&NodeId::from("a"), &NodeId::Int(1)));
/// # Ok::<(), erdos_providers_gml::GmlError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GmlReader;

impl GmlReader {
    /// Reads the graph stored at `path`.
    ///
    /// # Errors
    /// [`GmlError::NotFound`] when the file does not exist,
    /// [`GmlError::Malformed`] when it is not a valid GML graph, and
    /// [`GmlError::Io`] for other read failures.
    pub fn read_path(path: impl AsRef<Path>) -> Result<Graph, GmlError> {
        read_file(path.as_ref())
    }

    /// Reads a graph from any byte stream.
    ///
    /// # Errors
    /// As for [`GmlReader::read_str`], plus [`GmlError::Io`] when reading
    /// fails.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Graph, GmlError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Self::read_str(&source)
    }

    /// Parses a graph from GML text.
    ///
    /// # Errors
    /// [`GmlError::Malformed`] when the text is not a valid simple undirected
    /// GML graph.
    pub fn read_str(source: &str) -> Result<Graph, GmlError> {
        let entries = syntax::parse(source)?;
        assemble(entries)
    }
}

#[instrument(name = "gml.read", skip_all, fields(path = %path.display()))]
fn read_file(path: &Path) -> Result<Graph, GmlError> {
    let source = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => GmlError::NotFound {
            path: path.to_path_buf(),
        },
        _ => GmlError::Io(err),
    })?;
    let graph = GmlReader::read_str(&source)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

fn assemble(entries: Vec<Entry>) -> Result<Graph, GmlError> {
    let mut graphs = entries.into_iter().filter(|entry| entry.key == "graph");
    let Some(graph_entry) = graphs.next() else {
        return Err(GmlError::malformed(1, "input contains no `graph` list"));
    };
    if let Some(extra) = graphs.next() {
        return Err(GmlError::malformed(
            extra.line,
            "input contains more than one graph",
        ));
    }
    let Value::List(body) = graph_entry.value else {
        return Err(GmlError::malformed(
            graph_entry.line,
            format!("`graph` must be a list, found {}", graph_entry.value.kind()),
        ));
    };

    let mut assembly = Assembly::default();
    let mut edges = Vec::new();
    for entry in body {
        match entry.key.as_str() {
            "directed" => reject_flag(&entry, "directed graphs are not supported")?,
            "multigraph" => reject_flag(&entry, "multigraphs are not supported")?,
            "node" => assembly.node(entry)?,
            "edge" => edges.push(entry),
            _ => {}
        }
    }
    // Edges may precede the nodes they reference.
    for entry in edges {
        assembly.edge(entry)?;
    }
    Ok(assembly.graph)
}

fn reject_flag(entry: &Entry, message: &str) -> Result<(), GmlError> {
    match entry.value {
        Value::Int(0) => Ok(()),
        Value::Int(1) => Err(GmlError::malformed(entry.line, message)),
        ref other => Err(GmlError::malformed(
            entry.line,
            format!("`{}` must be 0 or 1, found {}", entry.key, other.kind()),
        )),
    }
}

#[derive(Default)]
struct Assembly {
    graph: Graph,
    by_id: HashMap<i64, NodeId>,
}

impl Assembly {
    fn node(&mut self, entry: Entry) -> Result<(), GmlError> {
        let line = entry.line;
        let fields = list_body(entry)?;

        let mut id = None;
        let mut label = None;
        let mut attributes = Vec::new();
        for field in fields {
            match (field.key.as_str(), field.value) {
                ("id", Value::Int(value)) => id = Some(value),
                ("id", other) => {
                    return Err(GmlError::malformed(
                        field.line,
                        format!("node `id` must be an integer, found {}", other.kind()),
                    ));
                }
                ("label", Value::Str(text)) => label = Some(text),
                ("label", Value::Int(value)) => label = Some(value.to_string()),
                ("label", Value::Real(value)) => label = Some(value.to_string()),
                ("label", Value::List(_)) => {
                    return Err(GmlError::malformed(field.line, "node `label` cannot be a list"));
                }
                (_, Value::List(_)) => {}
                (key, Value::Int(value)) => attributes.push((key.to_owned(), AttributeValue::Int(value))),
                (key, Value::Real(value)) => attributes.push((key.to_owned(), AttributeValue::Float(value))),
                (key, Value::Str(text)) => attributes.push((key.to_owned(), AttributeValue::Text(text))),
            }
        }

        let Some(id) = id else {
            return Err(GmlError::malformed(line, "node has no `id`"));
        };
        if self.by_id.contains_key(&id) {
            return Err(GmlError::malformed(line, format!("duplicate node id {id}")));
        }
        let name = NodeId::parse(&label.unwrap_or_else(|| id.to_string()));
        if !self.graph.add_node(name.clone()) {
            return Err(GmlError::malformed(
                line,
                format!("duplicate node label `{name}`"),
            ));
        }
        for (key, value) in attributes {
            self.graph
                .set_attribute(&name, key, value)
                .map_err(|err| GmlError::malformed(line, err.to_string()))?;
        }
        self.by_id.insert(id, name);
        Ok(())
    }

    fn edge(&mut self, entry: Entry) -> Result<(), GmlError> {
        let line = entry.line;
        let fields = list_body(entry)?;

        let mut source = None;
        let mut target = None;
        for field in fields {
            let slot = match field.key.as_str() {
                "source" => &mut source,
                "target" => &mut target,
                _ => continue,
            };
            let Value::Int(value) = field.value else {
                return Err(GmlError::malformed(
                    field.line,
                    format!("edge `{}` must be an integer", field.key),
                ));
            };
            *slot = Some(value);
        }

        let left = self.endpoint(source, "source", line)?;
        let right = self.endpoint(target, "target", line)?;
        if left == right {
            return Err(GmlError::malformed(
                line,
                format!("self-loop on node `{left}` is not allowed"),
            ));
        }
        let inserted = self
            .graph
            .add_edge(&left, &right)
            .map_err(|err| GmlError::malformed(line, err.to_string()))?;
        if !inserted {
            return Err(GmlError::malformed(
                line,
                format!("duplicate edge between `{left}` and `{right}`"),
            ));
        }
        Ok(())
    }

    fn endpoint(&self, id: Option<i64>, role: &str, line: usize) -> Result<NodeId, GmlError> {
        let id = id.ok_or_else(|| GmlError::malformed(line, format!("edge has no `{role}`")))?;
        self.by_id.get(&id).cloned().ok_or_else(|| {
            GmlError::malformed(line, format!("edge {role} references unknown node id {id}"))
        })
    }
}

fn list_body(entry: Entry) -> Result<Vec<Entry>, GmlError> {
    match entry.value {
        Value::List(fields) => Ok(fields),
        other => Err(GmlError::malformed(
            entry.line,
            format!("`{}` must be a list, found {}", entry.key, other.kind()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn integer_names_are_normalised() {
        let graph = GmlReader::read_str(
            "graph [\n node [ id 10 label \"3\" ]\n node [ id 11 label \"x\" ]\n node [ id 12 ]\n edge [ source 10 target 12 ]\n]",
        )
        .expect("valid graph");
        let names: Vec<_> = graph.nodes().cloned().collect();
        assert_eq!(
            names,
            vec![NodeId::Int(3), NodeId::from("x"), NodeId::Int(12)]
        );
        assert!(graph.contains_edge(&NodeId::Int(3), &NodeId::Int(12)));
    }

    #[rstest]
    fn scalar_node_keys_become_attributes() {
        let graph = GmlReader::read_str(
            "graph [ node [ id 0 weight 2 score 0.5 colour \"red\" graphics [ x 1 ] ] ]",
        )
        .expect("valid graph");
        let node = NodeId::Int(0);
        assert_eq!(graph.attribute(&node, "weight"), Some(&AttributeValue::Int(2)));
        assert_eq!(graph.attribute(&node, "score"), Some(&AttributeValue::Float(0.5)));
        assert_eq!(
            graph.attribute(&node, "colour"),
            Some(&AttributeValue::Text("red".to_owned()))
        );
        assert_eq!(graph.attribute(&node, "graphics"), None);
        assert_eq!(graph.attributes(&node).map(|a| a.len()), Some(3));
    }

    #[rstest]
    fn edges_may_precede_nodes() {
        let graph =
            GmlReader::read_str("graph [ edge [ source 1 target 2 ] node [ id 1 ] node [ id 2 ] ]")
                .expect("valid graph");
        assert_eq!(graph.edge_count(), 1);
    }

    #[rstest]
    fn explicit_undirected_flags_are_accepted() {
        let graph = GmlReader::read_str("Creator \"x\" graph [ directed 0 multigraph 0 ]")
            .expect("valid graph");
        assert!(graph.is_empty());
    }

    #[rstest]
    #[case::no_graph("node [ id 0 ]", 1, "no `graph`")]
    #[case::two_graphs("graph [ ]\ngraph [ ]", 2, "more than one graph")]
    #[case::graph_scalar("graph 1", 1, "must be a list")]
    #[case::directed("graph [\n directed 1\n]", 2, "directed graphs")]
    #[case::multigraph("graph [\n multigraph 1\n]", 2, "multigraphs")]
    #[case::bad_flag("graph [ directed \"yes\" ]", 1, "must be 0 or 1")]
    #[case::missing_id("graph [\n node [ label \"a\" ]\n]", 2, "no `id`")]
    #[case::text_id("graph [ node [ id \"a\" ] ]", 1, "must be an integer")]
    #[case::duplicate_id("graph [\n node [ id 0 ]\n node [ id 0 ]\n]", 3, "duplicate node id 0")]
    #[case::duplicate_label(
        "graph [\n node [ id 0 label \"a\" ]\n node [ id 1 label \"a\" ]\n]",
        3,
        "duplicate node label `a`"
    )]
    #[case::unknown_endpoint(
        "graph [\n node [ id 0 ]\n edge [ source 0 target 9 ]\n]",
        3,
        "unknown node id 9"
    )]
    #[case::missing_target("graph [ node [ id 0 ] edge [ source 0 ] ]", 1, "no `target`")]
    #[case::self_loop("graph [ node [ id 0 ] edge [ source 0 target 0 ] ]", 1, "self-loop")]
    #[case::duplicate_edge(
        "graph [\n node [ id 0 ]\n node [ id 1 ]\n edge [ source 0 target 1 ]\n edge [ source 1 target 0 ]\n]",
        5,
        "duplicate edge"
    )]
    fn rejects_invalid_graphs(
        #[case] source: &str,
        #[case] expected_line: usize,
        #[case] fragment: &str,
    ) {
        match GmlReader::read_str(source) {
            Err(GmlError::Malformed { line, message }) => {
                assert_eq!(line, expected_line, "{message}");
                assert!(message.contains(fragment), "{message}");
            }
            other => panic!("expected a malformed error, got {other:?}"),
        }
    }
}
