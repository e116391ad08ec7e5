//! This module turns a raw routing polyline into a bounded synthetic graph:
//! sampling, shortcut policies and graph construction.

mod builder;
mod config;
mod sampler;

pub use builder::build_route_graph;
pub use config::{AlgorithmFamily, EngineConfig, ShortcutConfig, ShortcutPolicy};
pub use sampler::sample_route;
