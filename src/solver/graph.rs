use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// A location of a graph instance. Instance files carry more columns (demand,
/// time window, service time); only the number and coordinates are used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphNode {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl GraphNode {
    pub fn distance_to(&self, other: &GraphNode) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_graphviz(&self) -> String {
        format!("{} [pos = \"{}, {}!\"]", self.id, self.x, self.y)
    }
}

pub fn load_graph(path: &Path) -> Result<Vec<GraphNode>> {
    let nodes = parse_graph(File::open(path)?)?;
    debug!("Loaded {} nodes from {}", nodes.len(), path.display());
    Ok(nodes)
}

/// Space-separated rows without a header: `<id> <x> <y> [ignored columns...]`.
/// Runs of spaces are allowed; the first row is the start node.
pub fn parse_graph<R: Read>(reader: R) -> Result<Vec<GraphNode>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut nodes = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }

        let malformed = || AnalysisError::MalformedGraph(format!("line {}: '{}'", line + 1, fields.join(" ")));
        if fields.len() < 3 {
            return Err(malformed());
        }
        nodes.push(GraphNode {
            id: fields[0].parse().map_err(|_| malformed())?,
            x: fields[1].parse().map_err(|_| malformed())?,
            y: fields[2].parse().map_err(|_| malformed())?,
        });
    }

    if nodes.len() < 2 {
        return Err(AnalysisError::MalformedGraph(format!(
            "a tour needs at least two nodes, found {}",
            nodes.len()
        )));
    }
    Ok(nodes)
}

/// Symmetric Euclidean distance matrix, indexed by position in `nodes`
pub fn distance_matrix(nodes: &[GraphNode]) -> Vec<Vec<f64>> {
    nodes
        .iter()
        .map(|a| nodes.iter().map(|b| a.distance_to(b)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_padded_instance_rows() {
        let text = "  0  50  50   0   0 1000  0\n  1  40  50  10  20  500 10\n\n 2 50 20 5 0 800 10\n";
        let nodes = parse_graph(text.as_bytes()).unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], GraphNode { id: 0, x: 50.0, y: 50.0 });
        assert_eq!(nodes[2], GraphNode { id: 2, x: 50.0, y: 20.0 });
    }

    #[test]
    fn short_or_non_numeric_rows_are_malformed() {
        assert!(matches!(
            parse_graph("0 1 1\n1 2\n".as_bytes()),
            Err(AnalysisError::MalformedGraph(_))
        ));
        assert!(matches!(
            parse_graph("0 1 1\n1 x 2\n".as_bytes()),
            Err(AnalysisError::MalformedGraph(_))
        ));
    }

    #[test]
    fn single_node_is_not_a_tour() {
        assert!(matches!(parse_graph("0 1 1\n".as_bytes()), Err(AnalysisError::MalformedGraph(_))));
    }

    #[test]
    fn distances_are_euclidean_and_symmetric() {
        let nodes = parse_graph("0 0 0\n1 3 4\n2 6 8\n".as_bytes()).unwrap();
        let dm = distance_matrix(&nodes);
        assert_eq!(dm[0][1], 5.0);
        assert_eq!(dm[1][0], 5.0);
        assert_eq!(dm[0][2], 10.0);
        assert_eq!(dm[2][2], 0.0);
    }
}
