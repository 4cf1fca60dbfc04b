//! Noisy graph core library.
//!
//! Models undirected graphs whose edges are either real or fake, grows noisy
//! graphs from real ones with σ-guided fake-edge injection, quantifies the
//! uncertainty fake edges impose on an observer, and profiles how centrality
//! measures drift once fake edges are mixed in.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod centrality;
mod distortion;
mod error;
mod node;
mod noise;
mod simple_graph;
pub mod stats;
mod store;
#[cfg(test)]
mod test_utils;
mod uncertainty;

pub use crate::{
    centrality::{
        BetweennessCentrality, Centrality, ClosenessCentrality, DegreeCentrality,
        EigenvectorCentrality, FnCentrality, Scores,
    },
    distortion::{DistortionProfile, DistortionProfiler, compare_scores},
    error::{
        GraphError, GraphErrorCode, NoiseError, NoiseErrorCode, ProfileError, ProfileErrorCode,
        ScoreSide, UncertaintyError, UncertaintyErrorCode,
    },
    node::{Edge, EdgeStatus, NodeId, NodeKey},
    noise::{
        ConstructionStats, NoiseConstructor, NoiseParams, NoisyGraph,
        ParseProcessingOrderError, ProcessingOrder, SigmaProfile, SigmaTable,
    },
    simple_graph::SimpleGraph,
    store::{EdgeCounts, EdgeInsert, EdgeStore},
    uncertainty::{
        Knowledge, UncertaintyConfig, UncertaintyProfile, hypothesis_count,
        log_hypothesis_count, uncertainty,
    },
};
