//! Analyses built on top of the routing engine.

pub mod complexity;
