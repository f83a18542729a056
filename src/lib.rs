pub mod config;
pub mod experiment;
pub mod generator;
pub mod graph;
pub mod grid;
pub mod heuristic;
pub mod search;
pub mod stat;
