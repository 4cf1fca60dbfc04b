//! Plain-text edge lists.
//!
//! One edge per line as two whitespace-separated node labels. A line with a
//! single label registers an isolated node. Text after `#` is ignored.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use noisygraph_core::SimpleGraph;
use thiserror::Error;
use tracing::{Span, field, instrument};

use super::commands::CliError;

/// Problems with a single edge-list line.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum EdgeLineError {
    /// The line held neither one nor two labels.
    #[error("expected one or two node labels, found {found}")]
    Arity {
        /// Number of labels found.
        found: usize,
    },
    /// Both labels named the same node.
    #[error("node `{node}` is linked to itself")]
    SelfLoop {
        /// The repeated label.
        node: String,
    },
}

/// Reads an edge list from `reader`; `path` is only used in errors.
///
/// Line numbers in errors are 1-based.
fn parse_edge_list<R: BufRead>(
    reader: R,
    path: &Path,
) -> Result<SimpleGraph<String>, CliError> {
    let mut graph = SimpleGraph::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = line.split('#').next().unwrap_or_default();
        let labels: Vec<&str> = content.split_whitespace().collect();
        let invalid = |source| CliError::EdgeList {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        };
        match labels.as_slice() {
            [] => {}
            [node] => {
                graph.add_node((*node).to_owned());
            }
            [u, v] => {
                graph
                    .add_edge((*u).to_owned(), (*v).to_owned())
                    .map_err(|_| invalid(EdgeLineError::SelfLoop { node: (*u).to_owned() }))?;
            }
            other => return Err(invalid(EdgeLineError::Arity { found: other.len() })),
        }
    }
    Ok(graph)
}

#[instrument(name = "cli.load_edge_list", err, fields(path = field::Empty))]
pub(super) fn load_edge_list(path: &Path) -> Result<SimpleGraph<String>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_edge_list(BufReader::new(file), path)
}
