//! Command-line interface for noisy-graph experiments.
//!
//! `run` builds an original graph from a random model or an edge-list file,
//! grows a noisy graph from it, and summarises compliance, uncertainty and
//! centrality distortion.

mod commands;
mod edge_list;

pub use commands::{
    BarabasiAlbertArgs, Cli, CliError, Command, EdgesArgs, ErdosRenyiArgs, Model, RunCommand,
    RunSummary, WattsStrogatzArgs, render_summary, run_cli,
};
pub use edge_list::EdgeLineError;
