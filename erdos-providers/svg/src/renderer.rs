//! Composes the SVG picture of a graph.

use std::{collections::HashMap, fs, path::Path};

use erdos_core::{BfsForest, Components, Graph, NodeId};
use tracing::{info, instrument};

use crate::{
    document::{SvgDocument, escape},
    errors::SvgError,
    layout::{Point, spring_layout},
};

/// Seed of the layout's random initial placement.
pub const DEFAULT_LAYOUT_SEED: u64 = 42;

/// Component fill colours, reused cyclically.
const COMPONENT_COLOURS: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// BFS tree colours, one per source, reused cyclically.
const TREE_COLOURS: [&str; 6] = ["red", "blue", "green", "orange", "purple", "brown"];

/// Graphs larger than this are drawn without node labels.
const LABEL_LIMIT: usize = 50;

const NODE_RADIUS: f64 = 9.0;
const SOURCE_RADIUS: f64 = 12.0;
const ISOLATED_SIDE: f64 = 20.0;

const MARGIN: f64 = 60.0;
const HEADER: f64 = 110.0;

/// Renders graphs as standalone SVG documents.
///
/// Nodes are coloured by connected component and isolated nodes are drawn as
/// squares. When a BFS forest is supplied, each source's tree edges are
/// overlaid in their own colour and the sources are drawn larger in yellow.
///
/// # Examples
/// ```
/// use erdos_core::{Graph, NodeId, analyze};
/// use erdos_providers_svg::SvgRenderer;
///
/// let mut graph = Graph::with_node_count(3);
/// graph.add_edge(&NodeId::Int(0), &NodeId::Int(1))?;
/// let analysis = analyze(&graph);
/// let svg = SvgRenderer::new().render(&graph, None, analysis.components())?;
/// assert!(svg.contains("3 nodes, 1 edges, 2 components"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    width: u32,
    height: u32,
    seed: u64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 1000,
            seed: DEFAULT_LAYOUT_SEED,
        }
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the canvas size in pixels.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Overrides the layout seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Renders `graph` to an SVG string.
    ///
    /// # Errors
    /// Returns [`SvgError::EmptyGraph`] when the graph has no nodes.
    #[instrument(
        name = "svg.render",
        skip_all,
        fields(nodes = graph.node_count(), edges = graph.edge_count()),
    )]
    pub fn render(
        &self,
        graph: &Graph,
        forest: Option<&BfsForest>,
        components: &Components,
    ) -> Result<String, SvgError> {
        if graph.is_empty() {
            return Err(SvgError::EmptyGraph);
        }

        let positions = spring_layout(graph, self.seed);
        let canvas: HashMap<&NodeId, (f64, f64)> = graph
            .nodes()
            .zip(positions.iter().map(|p| self.project(*p)))
            .collect();
        let at = |node: &NodeId| canvas.get(node).copied().unwrap_or((0.0, 0.0));

        let mut document = SvgDocument::new(self.width, self.height);
        self.draw_title(&mut document, graph, components);

        document.open_group("graph-edges", None);
        for (left, right) in graph.edges() {
            document.line(at(left), at(right), "gray", 1.0, 0.3);
        }
        document.close_group();

        for (index, result) in forest.into_iter().flatten().enumerate() {
            let colour = TREE_COLOURS[index % TREE_COLOURS.len()];
            document.open_group("bfs-tree", Some(result.source()));
            for (parent, child) in result.tree_edges() {
                document.line(at(parent), at(child), colour, 2.0, 0.7);
            }
            document.close_group();
        }

        let sources: Vec<&NodeId> = forest.map(|f| f.sources().collect()).unwrap_or_default();
        let mut isolated = 0_usize;
        document.open_group("graph-nodes", None);
        for node in graph.nodes() {
            let fill = components
                .component_of(node)
                .map_or(COMPONENT_COLOURS[0], |c| {
                    COMPONENT_COLOURS[c % COMPONENT_COLOURS.len()]
                });
            let (x, y) = at(node);
            let title = escape(&node.to_string());
            if sources.contains(&node) {
                document.raw(&format!(
                    r#"<circle class="node source" cx="{x:.2}" cy="{y:.2}" r="{SOURCE_RADIUS}" fill="yellow" stroke="black" stroke-width="2"><title>{title}</title></circle>"#
                ));
            } else if graph.degree(node) == Some(0) {
                isolated += 1;
                let half = ISOLATED_SIDE / 2.0;
                document.raw(&format!(
                    r#"<rect class="node isolated" x="{:.2}" y="{:.2}" width="{ISOLATED_SIDE}" height="{ISOLATED_SIDE}" fill="{fill}" fill-opacity="0.9"><title>{title}</title></rect>"#,
                    x - half,
                    y - half
                ));
            } else {
                document.raw(&format!(
                    r#"<circle class="node" cx="{x:.2}" cy="{y:.2}" r="{NODE_RADIUS}" fill="{fill}" fill-opacity="0.9"><title>{title}</title></circle>"#
                ));
            }
        }
        document.close_group();

        if graph.node_count() <= LABEL_LIMIT {
            document.open_group("labels", None);
            for node in graph.nodes() {
                document.text(at(node), 8, true, "middle", &node.to_string());
            }
            document.close_group();
        }

        draw_legend(&mut document, &sources, isolated > 0);

        info!(
            width = self.width,
            height = self.height,
            trees = sources.len(),
            "rendered graph"
        );
        Ok(document.finish())
    }

    /// Renders `graph` and writes the SVG to `path`.
    ///
    /// # Errors
    /// Returns [`SvgError::EmptyGraph`] when the graph has no nodes and
    /// [`SvgError::Write`] when the file cannot be written.
    pub fn render_to_path(
        &self,
        graph: &Graph,
        forest: Option<&BfsForest>,
        components: &Components,
        path: impl AsRef<Path>,
    ) -> Result<(), SvgError> {
        let path = path.as_ref();
        let svg = self.render(graph, forest, components)?;
        fs::write(path, svg).map_err(|source| SvgError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "saved visualisation");
        Ok(())
    }

    /// Maps a layout point in `[-1, 1]²` onto the drawing area.
    fn project(&self, point: Point) -> (f64, f64) {
        let width = f64::from(self.width) - 2.0 * MARGIN;
        let height = f64::from(self.height) - HEADER - MARGIN;
        (
            MARGIN + (point.x + 1.0) / 2.0 * width,
            HEADER + (point.y + 1.0) / 2.0 * height,
        )
    }

    fn draw_title(&self, document: &mut SvgDocument, graph: &Graph, components: &Components) {
        let centre = f64::from(self.width) / 2.0;
        let plural = if components.len() == 1 { "" } else { "s" };
        document.text((centre, 30.0), 18, true, "middle", "Graph Visualization");
        document.text(
            (centre, 58.0),
            14,
            true,
            "middle",
            &format!(
                "{} nodes, {} edges, {} component{plural}",
                graph.node_count(),
                graph.edge_count(),
                components.len()
            ),
        );
    }
}

fn draw_legend(document: &mut SvgDocument, sources: &[&NodeId], isolated: bool) {
    if sources.is_empty() && !isolated {
        return;
    }
    document.open_group("legend", None);
    let mut y = HEADER - 20.0;
    for (index, source) in sources.iter().enumerate() {
        let colour = TREE_COLOURS[index % TREE_COLOURS.len()];
        document.line((20.0, y), (44.0, y), colour, 2.0, 0.7);
        document.text((52.0, y), 9, false, "start", &format!("BFS from {source}"));
        y += 16.0;
    }
    if isolated {
        document.raw(&format!(
            r#"<rect x="26" y="{:.2}" width="12" height="12" fill="{}"/>"#,
            y - 6.0,
            COMPONENT_COLOURS[0]
        ));
        document.text((52.0, y), 9, false, "start", "Isolated nodes");
    }
    document.close_group();
}
