//! Data structures for road networks.

pub mod graph;
pub mod road_network;
