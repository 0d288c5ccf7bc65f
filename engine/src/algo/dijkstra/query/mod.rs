//! Query entry points for the dijkstra variants

use super::*;

pub mod dijkstra;
