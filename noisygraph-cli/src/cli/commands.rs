//! Command definitions and the `run` pipeline.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use noisygraph_core::{
    BetweennessCentrality, Centrality, ClosenessCentrality, DegreeCentrality, DistortionProfile,
    DistortionProfiler, EigenvectorCentrality, Knowledge, NodeKey, NoiseConstructor, NoiseError,
    NoiseParams, ProcessingOrder, ProfileError, SigmaProfile, SimpleGraph, UncertaintyConfig,
    UncertaintyError, UncertaintyProfile,
};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::edge_list::{EdgeLineError, load_edge_list};
use crate::generators::{self, GeneratorError};

const DEFAULT_SEED: u64 = 0x5EED_CAFE;
const DEFAULT_BASE: f64 = 2.0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "noisygraph",
    about = "Hide real edges among fake ones and measure what it costs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build a noisy graph and report its uncertainty and distortion.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Target number of fake edges per real edge, in (0, 1].
    #[arg(long)]
    pub ftrp: f64,

    /// Seed for the graph model and the noise construction.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Order in which nodes are replayed into the noisy graph.
    #[arg(long, default_value_t = ProcessingOrder::AsSupplied)]
    pub order: ProcessingOrder,

    /// Logarithm base for uncertainty values.
    #[arg(long, default_value_t = DEFAULT_BASE)]
    pub base: f64,

    /// Assume the observer only knows an upper bound on the fake edges.
    #[arg(long)]
    pub upper_bound: bool,

    /// Graph to start from.
    #[command(subcommand)]
    pub model: Model,
}

/// Where the original graph comes from.
#[derive(Debug, Subcommand, Clone)]
pub enum Model {
    /// Erdős–Rényi `G(n, p)` random graph.
    ErdosRenyi(ErdosRenyiArgs),
    /// Watts–Strogatz small-world graph.
    WattsStrogatz(WattsStrogatzArgs),
    /// Barabási–Albert preferential-attachment graph.
    BarabasiAlbert(BarabasiAlbertArgs),
    /// Edge list read from a file.
    Edges(EdgesArgs),
}

/// `erdos-renyi` arguments.
#[derive(Debug, Args, Clone)]
pub struct ErdosRenyiArgs {
    /// Number of nodes.
    #[arg(long)]
    pub nodes: u32,
    /// Probability that any given pair is linked.
    #[arg(long)]
    pub probability: f64,
}

/// `watts-strogatz` arguments.
#[derive(Debug, Args, Clone)]
pub struct WattsStrogatzArgs {
    /// Number of nodes.
    #[arg(long)]
    pub nodes: u32,
    /// Ring-lattice degree before rewiring.
    #[arg(long)]
    pub neighbours: u32,
    /// Probability that a lattice edge is rewired.
    #[arg(long)]
    pub rewire: f64,
}

/// `barabasi-albert` arguments.
#[derive(Debug, Args, Clone)]
pub struct BarabasiAlbertArgs {
    /// Number of nodes.
    #[arg(long)]
    pub nodes: u32,
    /// Edges attached by each arriving node.
    #[arg(long)]
    pub attachments: u32,
}

/// `edges` arguments.
#[derive(Debug, Args, Clone)]
pub struct EdgesArgs {
    /// Whitespace-separated edge list, one edge per line.
    pub path: PathBuf,

    /// Label used in the summary (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An edge-list line could not be parsed.
    #[error("{path}:{line}: {source}")]
    EdgeList {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        #[source]
        source: EdgeLineError,
    },
    /// No edges were left once isolated nodes were pruned.
    #[error("graph `{model}` has no edges after pruning isolated nodes")]
    EmptyGraph {
        /// Label of the input graph.
        model: String,
    },
    /// The graph model rejected its parameters.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    /// Noise construction failed.
    #[error(transparent)]
    Noise(#[from] NoiseError),
    /// Uncertainty could not be computed.
    #[error(transparent)]
    Uncertainty(#[from] UncertaintyError),
    /// Distortion profiling failed.
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl CliError {
    /// Stable code of the underlying library error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Generator(GeneratorError::Graph(error)) => Some(error.code().as_str()),
            Self::Noise(error) => Some(error.code().as_str()),
            Self::Uncertainty(error) => Some(error.code().as_str()),
            Self::Profile(error) => Some(error.code().as_str()),
            _ => None,
        }
    }
}

/// Outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Label of the input graph.
    pub model: String,
    /// Nodes taking part in the noisy graph.
    pub nodes: usize,
    /// Isolated nodes dropped before construction.
    pub isolates_pruned: usize,
    /// Real edges of the input graph.
    pub real_edges: usize,
    /// Fake edges injected.
    pub fake_edges: usize,
    /// Nodes whose σ reached 1.
    pub compliant_nodes: usize,
    /// σ mean and variance; `None` for an empty graph.
    pub sigma: Option<SigmaProfile>,
    /// Graph-level uncertainty.
    pub uncertainty: f64,
    /// Uncertainty settings used.
    pub uncertainty_config: UncertaintyConfig,
    /// Per-node uncertainty statistics.
    pub node_uncertainty: Option<UncertaintyProfile>,
    /// One row per centrality measure.
    pub distortion: Vec<DistortionProfile>,
}

/// Validated settings shared by every model.
#[derive(Debug, Clone, Copy)]
struct Settings {
    noise: NoiseParams,
    uncertainty: UncertaintyConfig,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the input cannot be built or analysed.
///
/// # Examples
/// ```
/// use noisygraph_cli::cli::{
///     BarabasiAlbertArgs, Cli, Command, Model, RunCommand, run_cli,
/// };
/// use noisygraph_core::ProcessingOrder;
///
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         ftrp: 0.5,
///         seed: 7,
///         order: ProcessingOrder::AsSupplied,
///         base: 2.0,
///         upper_bound: false,
///         model: Model::BarabasiAlbert(BarabasiAlbertArgs {
///             nodes: 20,
///             attachments: 2,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.nodes, 20);
/// assert_eq!(summary.distortion.len(), 4);
/// # Ok::<(), noisygraph_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<RunSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(ftrp = command.ftrp, seed = command.seed, model = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<RunSummary, CliError> {
    let RunCommand {
        ftrp,
        seed,
        order,
        base,
        upper_bound,
        model,
    } = command;
    let knowledge = if upper_bound {
        Knowledge::UpperBound
    } else {
        Knowledge::Exact
    };
    let settings = Settings {
        noise: NoiseParams::new(ftrp)?
            .with_rng_seed(seed)
            .with_processing_order(order),
        uncertainty: UncertaintyConfig::default()
            .with_base(base)?
            .with_knowledge(knowledge),
    };

    let label = model_label(&model);
    Span::current().record("model", field::display(&label));

    let mut rng = SmallRng::seed_from_u64(seed);
    let summary = match model {
        Model::ErdosRenyi(args) => {
            let graph = generators::erdos_renyi(args.nodes, args.probability, &mut rng)?;
            analyse(label, &graph, settings)?
        }
        Model::WattsStrogatz(args) => {
            let graph =
                generators::watts_strogatz(args.nodes, args.neighbours, args.rewire, &mut rng)?;
            analyse(label, &graph, settings)?
        }
        Model::BarabasiAlbert(args) => {
            let graph = generators::barabasi_albert(args.nodes, args.attachments, &mut rng)?;
            analyse(label, &graph, settings)?
        }
        Model::Edges(args) => {
            let graph = load_edge_list(&args.path)?;
            analyse(label, &graph, settings)?
        }
    };

    info!(
        model = summary.model.as_str(),
        nodes = summary.nodes,
        fake_edges = summary.fake_edges,
        uncertainty = summary.uncertainty,
        "command completed"
    );
    Ok(summary)
}

fn model_label(model: &Model) -> String {
    match model {
        Model::ErdosRenyi(args) => {
            format!("erdos-renyi(n={}, p={})", args.nodes, args.probability)
        }
        Model::WattsStrogatz(args) => format!(
            "watts-strogatz(n={}, k={}, p={})",
            args.nodes, args.neighbours, args.rewire
        ),
        Model::BarabasiAlbert(args) => {
            format!("barabasi-albert(n={}, m={})", args.nodes, args.attachments)
        }
        Model::Edges(args) => derive_graph_name(&args.path, args.name.as_deref()),
    }
}

pub(super) fn derive_graph_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "edges".to_owned(), ToOwned::to_owned)
}

#[instrument(
    name = "cli.analyse",
    err,
    skip_all,
    fields(model = %model, nodes = graph.node_count(), edges = graph.edge_count()),
)]
fn analyse<N: NodeKey>(
    model: String,
    graph: &SimpleGraph<N>,
    settings: Settings,
) -> Result<RunSummary, CliError> {
    let isolates_pruned = graph.isolates().len();
    let graph = graph.without_isolates();
    if isolates_pruned > 0 {
        info!(isolates = isolates_pruned, "pruned isolated nodes");
    }
    if graph.edge_count() == 0 {
        return Err(CliError::EmptyGraph { model });
    }

    let noisy = NoiseConstructor::new(settings.noise).construct(graph.adjacency())?;
    let uncertainty = noisy.uncertainty(&settings.uncertainty)?;
    let node_uncertainty = noisy.uncertainty_profile(&settings.uncertainty)?;

    let eigenvector = EigenvectorCentrality::default();
    let centralities: [&dyn Centrality<N>; 4] = [
        &DegreeCentrality,
        &BetweennessCentrality,
        &ClosenessCentrality,
        &eigenvector,
    ];
    let distortion =
        DistortionProfiler::for_noisy_graph(&graph, &noisy).profile_all(&centralities)?;

    Ok(RunSummary {
        model,
        nodes: graph.node_count(),
        isolates_pruned,
        real_edges: graph.edge_count(),
        fake_edges: noisy.stats().fake_edges_added,
        compliant_nodes: noisy.stats().compliant_nodes,
        sigma: noisy.sigmas().profile(),
        uncertainty,
        uncertainty_config: settings.uncertainty,
        node_uncertainty,
        distortion,
    })
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_owned(), |value| format!("{value:.6}"))
}

/// Renders `summary` to `writer` as plain text.
///
/// Statistics that are undefined for the run are printed as `undefined`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &RunSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "model: {}", summary.model)?;
    writeln!(
        writer,
        "nodes: {} ({} isolated pruned)",
        summary.nodes, summary.isolates_pruned
    )?;
    writeln!(writer, "real edges: {}", summary.real_edges)?;
    writeln!(writer, "fake edges: {}", summary.fake_edges)?;
    writeln!(
        writer,
        "sigma: mean {}, variance {}, compliant {}/{}",
        optional(summary.sigma.map(|sigma| sigma.mean)),
        optional(summary.sigma.map(|sigma| sigma.variance)),
        summary.compliant_nodes,
        summary.nodes
    )?;
    let knowledge = match summary.uncertainty_config.knowledge() {
        Knowledge::Exact => "exact",
        Knowledge::UpperBound => "upper bound",
    };
    writeln!(
        writer,
        "uncertainty: {:.6} (base {}, {knowledge})",
        summary.uncertainty,
        summary.uncertainty_config.base()
    )?;
    let node = summary.node_uncertainty;
    writeln!(
        writer,
        "node uncertainty: mean {}, std dev {}, min {}, max {}",
        optional(node.map(|profile| profile.mean)),
        optional(node.map(|profile| profile.std_dev)),
        optional(node.map(|profile| profile.min)),
        optional(node.map(|profile| profile.max)),
    )?;
    writeln!(writer, "centrality\tdistance\tcorrelation\tmean change")?;
    for row in &summary.distortion {
        writeln!(
            writer,
            "{}\t{:.6}\t{}\t{}",
            row.centrality,
            row.distance,
            optional(row.correlation),
            optional(row.mean_change)
        )?;
    }
    Ok(())
}
