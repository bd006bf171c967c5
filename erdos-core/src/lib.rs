//! Erdős core library: simple undirected graphs, Erdős–Rényi generation,
//! multi-source breadth-first traversal, and structural analysis.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analysis;
mod annotations;
#[cfg(feature = "generator")]
mod builder;
mod error;
#[cfg(feature = "generator")]
mod generator;
mod graph;
mod node;
#[cfg(all(test, feature = "generator"))]
mod property_tests;
mod session;
#[cfg(test)]
mod test_utils;
mod traversal;

#[cfg(feature = "generator")]
#[cfg_attr(docsrs, doc(cfg(feature = "generator")))]
pub use crate::{builder::GeneratorBuilder, generator::ErdosRenyi};
pub use crate::{
    analysis::{
        AnalysisResult, Analyzer, AnalyzerBuilder, AveragePathLength, Components,
        DEFAULT_CYCLE_SAMPLE_LIMIT, DegreeStats, PathLengthScope, analyze,
    },
    annotations::{COMPONENT_KEY, NodeAnnotations, annotate, distance_key, parent_key},
    error::{GraphError, GraphErrorCode, Result},
    graph::{Attributes, Graph},
    node::{AttributeValue, NodeId},
    session::GraphSession,
    traversal::{BfsForest, BfsResult, multi_source_bfs},
};
