// src/structure/mod.rs

//! Tournament structure and round topology.
//!
//! - [`dependency`] derives round-to-round adjacency from match sources.
//! - [`topology`] answers first / last / preceding / following round
//!   queries for bracket and pool stages.
//! - [`tournament`] owns the records and ties the two together.

pub mod dependency;
pub mod topology;
pub mod tournament;

pub use dependency::{DependencyIndex, RoundDependency};
pub use topology::{topology_for, BracketTopology, PoolTopology, Topology};
pub use tournament::TournamentStructure;
