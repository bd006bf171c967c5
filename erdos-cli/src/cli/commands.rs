//! Argument parsing and the graph pipeline behind the `erdos` binary.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use erdos_core::{
    AnalysisResult, BfsForest, GeneratorBuilder, Graph, GraphError, GraphSession, NodeId,
    PathLengthScope, analyze,
};
use erdos_providers_gml::{GmlError, GmlReader, GmlWriter};
use erdos_providers_svg::{SvgError, SvgRenderer};
use thiserror::Error;
use tracing::{Span, error, field, info, instrument};

const DEFAULT_PLOT_PATH: &str = "graph.svg";
const COMPONENT_PREVIEW: usize = 10;
const ISOLATED_PREVIEW: usize = 20;
const CYCLE_PREVIEW: usize = 3;
const RULE_WIDTH: usize = 60;

/// Command-line options parsed by [`clap`].
///
/// Exactly one graph source is required: `--input` or
/// `--create-random-graph`. Everything else is optional and runs in a fixed
/// order: BFS, path queries, analysis, save, plot.
#[derive(Debug, Parser, Clone, Default)]
#[command(
    name = "erdos",
    about = "Generate or load a simple undirected graph, then traverse, analyse, save and draw it.",
    group(
        ArgGroup::new("source")
            .required(true)
            .args(["input", "create_random_graph"])
    )
)]
pub struct Cli {
    /// GML file to load.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Generate an Erdős–Rényi graph with N nodes and edge probability
    /// (C · ln N) / N.
    #[arg(
        long = "create-random-graph",
        num_args = 2,
        value_names = ["N", "C"],
        allow_negative_numbers = true
    )]
    pub create_random_graph: Option<Vec<String>>,

    /// Seed for the random graph generator.
    #[arg(long, env = "ERDOS_SEED", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Run breadth-first search from every NODE.
    #[arg(
        long = "multi-bfs",
        num_args = 1..,
        value_name = "NODE",
        allow_negative_numbers = true
    )]
    pub multi_bfs: Vec<String>,

    /// Print the shortest path to NODE from every BFS source.
    #[arg(
        long = "path-to",
        value_name = "NODE",
        requires = "multi_bfs",
        allow_negative_numbers = true
    )]
    pub path_to: Vec<String>,

    /// Report components, cycles, density, path length and degrees.
    #[arg(long)]
    pub analyze: bool,

    /// Draw the graph as SVG.
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_PLOT_PATH
    )]
    pub plot: Option<PathBuf>,

    /// Save the graph, with component and BFS annotations, as GML.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Errors that stop a run.
///
/// Save and plot failures are not among them: they are logged and the run
/// continues.
#[derive(Debug, Error)]
pub enum CliError {
    /// The arguments do not describe a runnable command.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the arguments.
        message: String,
    },
    /// Graph generation failed.
    #[error(transparent)]
    Core(#[from] GraphError),
    /// Loading or saving GML failed.
    #[error(transparent)]
    Gml(#[from] GmlError),
    /// Rendering the visualisation failed.
    #[error(transparent)]
    Svg(#[from] SvgError),
}

impl CliError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Stable machine-readable code, delegating to the wrapped error.
    ///
    /// # Examples
    /// ```
    /// use erdos_cli::cli::CliError;
    /// use erdos_core::GraphError;
    ///
    /// let err = CliError::from(GraphError::InvalidNodeCount { got: 0 });
    /// assert_eq!(err.code(), "GRAPH_INVALID_NODE_COUNT");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "CLI_INVALID_ARGUMENT",
            Self::Core(err) => err.code().as_str(),
            Self::Gml(err) => err.code().as_str(),
            Self::Svg(err) => err.code().as_str(),
        }
    }
}

/// Where the graph of a run came from.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphOrigin {
    /// Read from a GML file.
    Loaded {
        /// The file that was read.
        path: PathBuf,
    },
    /// Drawn from the Erdős–Rényi model.
    Generated {
        /// The constant `c`.
        constant: f64,
        /// Edge probability after clamping.
        probability: f64,
        /// Whether `(c · ln n) / n` exceeded `1`.
        clamped: bool,
        /// The seed, when one was supplied.
        seed: Option<u64>,
    },
}

/// A shortest path requested with `--path-to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    /// BFS source the path starts at.
    pub source: NodeId,
    /// Requested end of the path.
    pub target: NodeId,
    /// Nodes from `source` to `target`, or `None` when unreachable.
    pub path: Option<Vec<NodeId>>,
}

/// Everything a run produced, ready for [`render_summary`].
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// How the graph was obtained.
    pub origin: GraphOrigin,
    /// The graph with its BFS forest and analysis.
    pub session: GraphSession,
    /// Answers to `--path-to`, grouped by target then source.
    pub paths: Vec<PathQuery>,
    /// Whether the analysis section was requested.
    pub analyzed: bool,
    /// Where the GML file was saved, if saving succeeded.
    pub saved: Option<PathBuf>,
    /// Where the SVG file was written, if plotting succeeded.
    pub plotted: Option<PathBuf>,
}

enum GraphRequest {
    Load(PathBuf),
    Generate { nodes: usize, constant: f64 },
}

/// Runs the pipeline described by `cli`.
///
/// # Errors
/// Returns [`CliError::InvalidArgument`] when the graph source is missing,
/// ambiguous or unparsable, [`CliError::Core`] when generation parameters
/// are rejected and [`CliError::Gml`] when the input cannot be loaded.
///
/// # Examples
/// ```
/// use erdos_cli::cli::{Cli, run_cli};
///
/// let cli = Cli {
///     create_random_graph: Some(vec!["12".into(), "1.5".into()]),
///     seed: Some(7),
///     multi_bfs: vec!["0".into()],
///     analyze: true,
///     ..Cli::default()
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.session.graph().node_count(), 12);
/// assert!(summary.session.forest().is_some());
/// # Ok::<(), erdos_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(source = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let request = graph_request(&cli)?;
    let span = Span::current();
    let (graph, origin) = match request {
        GraphRequest::Load(path) => {
            span.record("source", "gml");
            load_graph(path)?
        }
        GraphRequest::Generate { nodes, constant } => {
            span.record("source", "generator");
            generate_graph(nodes, constant, cli.seed)?
        }
    };
    let mut session = GraphSession::new(graph);

    let mut paths = Vec::new();
    if !cli.multi_bfs.is_empty() {
        let sources = parse_nodes(&cli.multi_bfs);
        let forest = session.run_bfs(&sources);
        paths = path_queries(forest, &parse_nodes(&cli.path_to));
    }
    if cli.analyze {
        session.analyze();
    }

    let saved = cli
        .output
        .and_then(|path| non_fatal("save", save_graph(&mut session, path)));
    let plotted = cli
        .plot
        .and_then(|path| non_fatal("plot", plot_graph(&session, path)));

    info!(
        nodes = session.graph().node_count(),
        edges = session.graph().edge_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        origin,
        session,
        paths,
        analyzed: cli.analyze,
        saved,
        plotted,
    })
}

fn graph_request(cli: &Cli) -> Result<GraphRequest, CliError> {
    match (&cli.input, &cli.create_random_graph) {
        (Some(_), Some(_)) => Err(CliError::invalid(
            "--input and --create-random-graph cannot be combined",
        )),
        (None, None) => Err(CliError::invalid(
            "one of --input or --create-random-graph is required",
        )),
        (Some(path), None) => Ok(GraphRequest::Load(path.clone())),
        (None, Some(values)) => parse_random_graph(values),
    }
}

fn parse_random_graph(values: &[String]) -> Result<GraphRequest, CliError> {
    let [raw_nodes, raw_constant] = values else {
        return Err(CliError::invalid(format!(
            "--create-random-graph takes N and C, got {} value(s)",
            values.len()
        )));
    };
    let nodes = raw_nodes.trim().parse::<usize>().map_err(|err| {
        CliError::invalid(format!("N must be a non-negative integer, got `{raw_nodes}`: {err}"))
    })?;
    let constant = raw_constant.trim().parse::<f64>().map_err(|err| {
        CliError::invalid(format!("C must be a number, got `{raw_constant}`: {err}"))
    })?;
    Ok(GraphRequest::Generate { nodes, constant })
}

fn parse_nodes(raw: &[String]) -> Vec<NodeId> {
    raw.iter().map(|value| NodeId::parse(value)).collect()
}

#[instrument(name = "cli.load", skip_all, fields(path = %path.display()))]
fn load_graph(path: PathBuf) -> Result<(Graph, GraphOrigin), CliError> {
    let graph = GmlReader::read_path(&path)?;
    Ok((graph, GraphOrigin::Loaded { path }))
}

#[instrument(
    name = "cli.generate",
    skip_all,
    fields(nodes = nodes, constant = constant, seed = ?seed),
)]
fn generate_graph(
    nodes: usize,
    constant: f64,
    seed: Option<u64>,
) -> Result<(Graph, GraphOrigin), CliError> {
    let mut builder = GeneratorBuilder::new(nodes, constant);
    if let Some(seed) = seed {
        builder = builder.with_rng_seed(seed);
    }
    let generator = builder.build()?;
    let graph = generator.generate();
    let origin = GraphOrigin::Generated {
        constant,
        probability: generator.probability(),
        clamped: generator.is_clamped(),
        seed,
    };
    Ok((graph, origin))
}

pub(super) fn path_queries(forest: &BfsForest, targets: &[NodeId]) -> Vec<PathQuery> {
    targets
        .iter()
        .flat_map(|target| {
            forest.iter().map(move |result| PathQuery {
                source: result.source().clone(),
                target: target.clone(),
                path: result.path_to(target),
            })
        })
        .collect()
}

#[instrument(name = "cli.save", skip_all, fields(path = %path.display()))]
pub(super) fn save_graph(session: &mut GraphSession, path: PathBuf) -> Result<PathBuf, CliError> {
    let annotations = session.annotations();
    GmlWriter::write_path(session.graph(), &annotations, &path)?;
    Ok(path)
}

#[instrument(name = "cli.plot", skip_all, fields(path = %path.display()))]
pub(super) fn plot_graph(session: &GraphSession, path: PathBuf) -> Result<PathBuf, CliError> {
    let fresh;
    let analysis = match session.analysis() {
        Some(analysis) => analysis,
        None => {
            fresh = analyze(session.graph());
            &fresh
        }
    };
    SvgRenderer::new().render_to_path(
        session.graph(),
        session.forest(),
        analysis.components(),
        &path,
    )?;
    Ok(path)
}

fn non_fatal(step: &'static str, outcome: Result<PathBuf, CliError>) -> Option<PathBuf> {
    match outcome {
        Ok(path) => Some(path),
        Err(err) => {
            error!(step, error = %err, code = err.code(), "step failed, continuing");
            None
        }
    }
}

/// Writes the human-readable report of `summary` to `writer`.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// use erdos_cli::cli::{Cli, render_summary, run_cli};
///
/// let cli = Cli {
///     create_random_graph: Some(vec!["5".into(), "0".into()]),
///     seed: Some(1),
///     analyze: true,
///     ..Cli::default()
/// };
/// let summary = run_cli(cli)?;
/// let mut out = Vec::new();
/// render_summary(&summary, &mut out)?;
/// let text = String::from_utf8(out)?;
/// assert!(text.contains("Isolated Nodes: 5"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(writer, "{rule}\nERDŐS–RÉNYI GRAPH ANALYZER\n{rule}\n")?;

    let session = &summary.session;
    write_origin(&mut writer, &summary.origin, session.graph())?;
    if let Some(forest) = session.forest() {
        write_bfs(&mut writer, forest, &summary.paths)?;
    }
    if let Some(analysis) = session.analysis().filter(|_| summary.analyzed) {
        write_analysis(&mut writer, analysis, &rule)?;
    }
    if let Some(path) = &summary.saved {
        writeln!(writer, "\nSaved graph to {}", path.display())?;
        if let Some(forest) = session.forest().filter(|forest| !forest.is_empty()) {
            writeln!(
                writer,
                "  Included BFS attributes from {} source(s)",
                forest.len()
            )?;
        }
        if let Some(analysis) = session.analysis() {
            writeln!(
                writer,
                "  Included component IDs for {} component(s)",
                analysis.components().len()
            )?;
        }
    }
    if let Some(path) = &summary.plotted {
        writeln!(writer, "\nSaved visualization to {}", path.display())?;
    }

    writeln!(writer, "\n{rule}\nCOMPLETE\n{rule}")?;
    Ok(())
}

fn write_origin(writer: &mut impl Write, origin: &GraphOrigin, graph: &Graph) -> io::Result<()> {
    match origin {
        GraphOrigin::Loaded { path } => {
            writeln!(writer, "Loaded graph from {}", path.display())?;
            writeln!(
                writer,
                "  Nodes: {}, Edges: {}",
                graph.node_count(),
                graph.edge_count()
            )
        }
        GraphOrigin::Generated {
            constant,
            probability,
            clamped,
            seed,
        } => {
            let n = graph.node_count();
            writeln!(writer, "Created Erdős–Rényi graph with n={n}, c={constant:.2}")?;
            writeln!(
                writer,
                "  Edge probability p = (c·ln n)/n = ({constant:.2}·ln {n})/{n} = {probability:.4}{}",
                if *clamped { " (clamped)" } else { "" }
            )?;
            if let Some(seed) = seed {
                writeln!(writer, "  Seed: {seed}")?;
            }
            writeln!(writer, "  Generated {} edges", graph.edge_count())
        }
    }
}

fn write_bfs(writer: &mut impl Write, forest: &BfsForest, paths: &[PathQuery]) -> io::Result<()> {
    writeln!(writer)?;
    if forest.is_empty() && forest.skipped().is_empty() {
        writeln!(writer, "No source nodes provided for BFS")?;
    }
    for result in forest {
        writeln!(
            writer,
            "BFS from node {}: reached {} nodes (eccentricity {})",
            result.source(),
            result.reachable_count(),
            result.eccentricity()
        )?;
    }
    for skipped in forest.skipped() {
        writeln!(writer, "BFS skipped node {skipped}: not in graph")?;
    }

    if paths.is_empty() {
        return Ok(());
    }
    writeln!(writer, "\nShortest Paths:")?;
    for query in paths {
        match &query.path {
            Some(path) => writeln!(
                writer,
                "  {} -> {}: {} ({} hops)",
                query.source,
                query.target,
                join(path, " -> "),
                path.len().saturating_sub(1)
            )?,
            None => writeln!(writer, "  {} -> {}: unreachable", query.source, query.target)?,
        }
    }
    Ok(())
}

fn write_analysis(writer: &mut impl Write, analysis: &AnalysisResult, rule: &str) -> io::Result<()> {
    writeln!(writer, "\n{rule}\nGRAPH ANALYSIS\n{rule}")?;

    writeln!(writer, "\nBasic Statistics:")?;
    writeln!(writer, "  Nodes: {}", analysis.node_count())?;
    writeln!(writer, "  Edges: {}", analysis.edge_count())?;

    let components = analysis.components();
    writeln!(writer, "\nConnected Components: {}", components.len())?;
    for (index, members) in components.iter().enumerate() {
        let mut sorted = members.to_vec();
        sorted.sort();
        let more = if sorted.len() > COMPONENT_PREVIEW { "..." } else { "" };
        writeln!(
            writer,
            "  Component {}: [{}]{more} ({} nodes)",
            index + 1,
            join(sorted.iter().take(COMPONENT_PREVIEW), ", "),
            members.len()
        )?;
    }

    let isolated = analysis.isolated_nodes();
    writeln!(writer, "\nIsolated Nodes: {}", isolated.len())?;
    if !isolated.is_empty() {
        let more = if isolated.len() > ISOLATED_PREVIEW { "..." } else { "" };
        writeln!(
            writer,
            "  [{}]{more}",
            join(isolated.iter().take(ISOLATED_PREVIEW), ", ")
        )?;
    }

    writeln!(writer, "\nCycle Detection:")?;
    let answer = if analysis.has_cycle() { "Yes" } else { "No" };
    writeln!(writer, "  Contains cycles: {answer}")?;
    let sample = analysis.cycle_sample();
    if !sample.is_empty() {
        writeln!(writer, "  Sample cycles found: {}", sample.len())?;
        for (index, cycle) in sample.iter().take(CYCLE_PREVIEW).enumerate() {
            writeln!(writer, "    Cycle {}: [{}]", index + 1, join(cycle, ", "))?;
        }
    }

    writeln!(writer, "\nGraph Density:")?;
    writeln!(writer, "  Density: {:.6}", analysis.density())?;
    writeln!(writer, "  (Ratio of actual edges to maximum possible edges)")?;

    writeln!(writer, "\nAverage Shortest Path Length:")?;
    let average = analysis.average_path_length();
    match (average.scope(), average.value()) {
        (PathLengthScope::WholeGraph, Some(value)) => {
            writeln!(writer, "  Average: {value:.4}")?;
        }
        (PathLengthScope::WholeGraph, None) => {
            writeln!(writer, "  Not defined for fewer than two nodes")?;
        }
        (PathLengthScope::LargestComponent { nodes }, value) => {
            writeln!(writer, "  Not applicable (graph is disconnected)")?;
            match value {
                Some(value) => writeln!(
                    writer,
                    "  Largest component ({nodes} nodes): {value:.4}"
                )?,
                None => writeln!(
                    writer,
                    "  Largest component ({nodes} nodes): not defined"
                )?,
            }
        }
    }

    if let Some(stats) = analysis.degree_stats() {
        writeln!(writer, "\nDegree Statistics:")?;
        writeln!(writer, "  Average degree: {:.2}", stats.average())?;
        writeln!(writer, "  Min degree: {}", stats.min())?;
        writeln!(writer, "  Max degree: {}", stats.max())?;
    }
    Ok(())
}

fn join<'a>(nodes: impl IntoIterator<Item = &'a NodeId>, separator: &str) -> String {
    nodes
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}
