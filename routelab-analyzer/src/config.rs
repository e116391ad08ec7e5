use std::{error::Error, fs, path::Path};

use clap::ValueEnum;
use routelab_core::{EngineConfig, algo::complexity::DEFAULT_SIZES};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Synthetic route sizes, in nodes
    pub sizes: Vec<usize>,
    pub format: OutputFormat,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            format: OutputFormat::Text,
        }
    }
}

/// Contents of the analyzer's TOML file. Both tables are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub engine: EngineConfig,
    pub analysis: AnalysisConfig,
}

impl AnalyzerConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = toml::from_str(content).map_err(|e| format!("TOML parse error: {e}"))?;
        config.engine.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AnalyzerConfig::parse("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.analysis.sizes, vec![10, 20, 30, 50, 100]);
    }

    #[test]
    fn tables_override_defaults() {
        let config = AnalyzerConfig::parse(
            r#"
            [engine]
            node_budget = 64
            average_speed_kmh = 30.0

            [engine.shortcuts.astar]
            stride = 2
            hops = 4
            penalty = 1.1

            [analysis]
            sizes = [16, 32]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.node_budget, 64);
        assert_eq!(config.engine.shortcuts.astar.hops, 4);
        assert_eq!(config.engine.shortcuts.dijkstra, EngineConfig::default().shortcuts.dijkstra);
        assert_eq!(config.analysis.sizes, vec![16, 32]);
        assert_eq!(config.analysis.format, OutputFormat::Json);
    }

    #[test]
    fn invalid_engine_settings_are_rejected() {
        let result = AnalyzerConfig::parse("[engine]\nnode_budget = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_format_is_a_parse_error() {
        let error = AnalyzerConfig::parse("[analysis]\nformat = \"yaml\"\n").unwrap_err();
        assert!(error.to_string().starts_with("TOML parse error"));
    }
}
