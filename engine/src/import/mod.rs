//! Reading road networks and location tables from map data exports.

use crate::datastr::{graph::*, road_network::*};
use crate::locations::LocationTable;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod csv_source;

pub use csv_source::CsvSource;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not open {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("could not parse {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("node {0} occurs more than once")]
    DuplicateNode(u64),
    #[error("edge {from} -> {to} references unknown node {node}")]
    UnknownNode { from: u64, to: u64, node: u64 },
    #[error("edge {from} -> {to} has invalid length {length}")]
    InvalidLength { from: u64, to: u64, length: f64 },
    #[error("{name} has invalid coordinates ({lat}, {lng})")]
    InvalidCoordinate { name: String, lat: f64, lng: f64 },
    #[error("No road network found")]
    NoEdges,
}

/// A node of the map data.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NodeRecord {
    pub id: u64,
    pub lat: f64,
    pub lon: f64,
}

/// A directed road segment, the length in meters may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EdgeRecord {
    pub from: u64,
    pub to: u64,
    pub length: Option<f64>,
}

/// A named place.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Where the nodes and edges of a road network come from.
pub trait NetworkSource {
    fn nodes(&self) -> Result<Vec<NodeRecord>, ImportError>;
    fn edges(&self) -> Result<Vec<EdgeRecord>, ImportError>;
}

pub fn read_network(source: &impl NetworkSource) -> Result<RoadNetwork, ImportError> {
    build_network(source.nodes()?, source.edges()?)
}

/// Read `nodes.csv` and `edges.csv` from the given directory.
pub fn load_csv_dir(dir: &Path) -> Result<RoadNetwork, ImportError> {
    read_network(&CsvSource::new(dir))
}

/// Nodes are numbered in the order they are given, edges keep their order per tail node.
pub fn build_network(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> Result<RoadNetwork, ImportError> {
    if edges.is_empty() {
        return Err(ImportError::NoEdges);
    }

    let mut node_ids = HashMap::with_capacity(nodes.len());
    let mut latitude = Vec::with_capacity(nodes.len());
    let mut longitude = Vec::with_capacity(nodes.len());
    let mut external_ids = Vec::with_capacity(nodes.len());

    for node in nodes {
        if !Coordinate::new(node.lat, node.lon).is_valid() {
            return Err(ImportError::InvalidCoordinate {
                name: format!("node {}", node.id),
                lat: node.lat,
                lng: node.lon,
            });
        }
        if node_ids.insert(node.id, external_ids.len() as NodeId).is_some() {
            return Err(ImportError::DuplicateNode(node.id));
        }
        latitude.push(node.lat);
        longitude.push(node.lon);
        external_ids.push(node.id);
    }

    let arcs = edges
        .iter()
        .map(|edge| {
            let lookup = |node: u64| {
                node_ids.get(&node).copied().ok_or(ImportError::UnknownNode {
                    from: edge.from,
                    to: edge.to,
                    node,
                })
            };
            let tail = lookup(edge.from)?;
            let head = lookup(edge.to)?;
            match edge.length {
                Some(length) if !length.is_finite() || length < 0.0 => Err(ImportError::InvalidLength {
                    from: edge.from,
                    to: edge.to,
                    length,
                }),
                length => Ok((tail, head, length)),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let graph = OwnedGraph::from_arcs(external_ids.len(), arcs);
    Ok(RoadNetwork::new(graph, latitude, longitude, external_ids))
}

/// Read a `name,lat,lon` file into a location table without bounds.
pub fn load_locations_csv(path: &Path, city: &str) -> Result<LocationTable, ImportError> {
    let records: Vec<LocationRecord> = csv_source::read_records(path)?;
    build_locations(records, city)
}

pub fn build_locations(records: Vec<LocationRecord>, city: &str) -> Result<LocationTable, ImportError> {
    let mut table = LocationTable::new(city.to_string(), None);
    for record in records {
        let coordinate = Coordinate::new(record.lat, record.lon);
        if !coordinate.is_valid() {
            return Err(ImportError::InvalidCoordinate {
                name: record.name,
                lat: record.lat,
                lng: record.lon,
            });
        }
        table.add_location(record.name, coordinate);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, lat: f64, lon: f64) -> NodeRecord {
        NodeRecord { id, lat, lon }
    }

    fn edge(from: u64, to: u64, length: Option<f64>) -> EdgeRecord {
        EdgeRecord { from, to, length }
    }

    #[test]
    fn external_ids_are_mapped_to_dense_node_ids() {
        let network = build_network(
            vec![node(42, 30.74, 76.78), node(7, 30.75, 76.79), node(1000, 30.76, 76.80)],
            vec![edge(42, 1000, Some(250.0)), edge(1000, 7, None), edge(42, 7, Some(90.5))],
        )
        .unwrap();

        assert_eq!(network.num_nodes(), 3);
        assert_eq!(network.num_arcs(), 3);
        assert_eq!(network.node_by_external_id(1000), Some(2));
        assert_eq!(network.graph().first_out(), &[0, 2, 2, 3]);
        assert_eq!(network.graph().head(), &[2, 1, 1]);
        assert_eq!(network.graph().length(), &[Some(250.0), Some(90.5), None]);
    }

    #[test]
    fn networks_without_edges_are_rejected() {
        let err = build_network(vec![node(1, 30.74, 76.78)], Vec::new()).unwrap_err();
        assert!(matches!(err, ImportError::NoEdges));
        assert_eq!(err.to_string(), "No road network found");
    }

    #[test]
    fn broken_map_data_is_rejected() {
        let nodes = || vec![node(1, 30.74, 76.78), node(2, 30.75, 76.79)];

        assert!(matches!(
            build_network(vec![node(1, 30.74, 76.78), node(1, 30.75, 76.79)], vec![edge(1, 1, None)]),
            Err(ImportError::DuplicateNode(1))
        ));
        assert!(matches!(
            build_network(nodes(), vec![edge(1, 3, Some(1.0))]),
            Err(ImportError::UnknownNode { node: 3, .. })
        ));
        assert!(matches!(
            build_network(nodes(), vec![edge(1, 2, Some(-4.0))]),
            Err(ImportError::InvalidLength { from: 1, to: 2, .. })
        ));
        assert!(matches!(
            build_network(nodes(), vec![edge(2, 1, Some(f64::NAN))]),
            Err(ImportError::InvalidLength { from: 2, to: 1, .. })
        ));
        assert!(matches!(
            build_network(vec![node(1, 130.0, 76.78)], vec![edge(1, 1, None)]),
            Err(ImportError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn location_records_become_a_table() {
        let table = build_locations(
            vec![
                LocationRecord {
                    name: "Bird Park".to_string(),
                    lat: 30.7473,
                    lon: 76.8133,
                },
                LocationRecord {
                    name: "Fun City".to_string(),
                    lat: 30.6950,
                    lon: 76.8420,
                },
            ],
            "chandigarh",
        )
        .unwrap();

        assert_eq!(table.city(), "chandigarh");
        assert_eq!(table.bounds(), None);
        assert_eq!(table.get("Fun City"), Some(Coordinate::new(30.6950, 76.8420)));
    }
}
