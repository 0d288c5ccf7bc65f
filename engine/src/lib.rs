//! Shortest driving routes between named places of a city.
//!
//! The crate is organized like a small routing engine:
//! `datastr` contains the road network representation,
//! `algo` the shortest path search (batch and step by step),
//! `import` reads road networks and location tables from CSV files,
//! `locations` holds the built-in named places and
//! `session` ties everything together into one explicit routing context.

#[macro_use]
pub mod report;

pub mod algo;
pub mod cli;
pub mod datastr;
pub mod import;
pub mod locations;
pub mod session;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
