use serde::{Deserialize, Serialize};

use crate::{DEFAULT_NODE_BUDGET, Error};

/// Graph family a synthetic graph is built for.
///
/// Each family gets its own shortcut policy so that the algorithms explore
/// structurally different but reachability-equivalent graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmFamily {
    Dijkstra,
    Astar,
    Bidirectional,
}

impl AlgorithmFamily {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::Astar => "astar",
            Self::Bidirectional => "bidirectional",
        }
    }
}

/// Forward shortcut placement: every `stride`-th node links `hops` nodes ahead
/// with weight `great_circle_distance * penalty`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortcutPolicy {
    pub stride: usize,
    pub hops: usize,
    /// Multiplier on the straight-line distance, at least 1.0 to keep the
    /// great-circle heuristic admissible
    pub penalty: f64,
}

impl ShortcutPolicy {
    pub const fn new(stride: usize, hops: usize, penalty: f64) -> Self {
        Self {
            stride,
            hops,
            penalty,
        }
    }

    /// Checks the policy for `family`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if stride or hops is zero, or if the
    /// penalty is not a finite number of at least 1.0
    pub fn validate(&self, family: AlgorithmFamily) -> Result<(), Error> {
        let family = family.name();
        if self.stride == 0 || self.hops == 0 {
            return Err(Error::InvalidConfig(format!(
                "{family} shortcut stride and hops must be positive"
            )));
        }
        if !self.penalty.is_finite() || self.penalty < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "{family} shortcut penalty must be a finite number >= 1.0, got {}",
                self.penalty
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    pub dijkstra: ShortcutPolicy,
    pub astar: ShortcutPolicy,
    pub bidirectional: ShortcutPolicy,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            dijkstra: ShortcutPolicy::new(8, 4, 1.5),
            astar: ShortcutPolicy::new(3, 3, 1.05),
            bidirectional: ShortcutPolicy::new(5, 2, 1.2),
        }
    }
}

impl ShortcutConfig {
    pub fn policy(&self, family: AlgorithmFamily) -> ShortcutPolicy {
        match family {
            AlgorithmFamily::Dijkstra => self.dijkstra,
            AlgorithmFamily::Astar => self.astar,
            AlgorithmFamily::Bidirectional => self.bidirectional,
        }
    }
}

/// Engine settings shared by every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of nodes sampled from the route polyline
    pub node_budget: usize,
    /// Used for durations when the source route carries no usable distance/duration
    pub average_speed_kmh: f64,
    pub shortcuts: ShortcutConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            node_budget: DEFAULT_NODE_BUDGET,
            average_speed_kmh: 40.0,
            shortcuts: ShortcutConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_node_budget(mut self, node_budget: usize) -> Self {
        self.node_budget = node_budget;
        self
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the node budget, the average speed or any shortcut
    /// policy is out of range
    pub fn validate(&self) -> Result<(), Error> {
        if self.node_budget < 2 {
            return Err(Error::InvalidNodeBudget(self.node_budget));
        }
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "average speed must be positive, got {}",
                self.average_speed_kmh
            )));
        }
        self.shortcuts.dijkstra.validate(AlgorithmFamily::Dijkstra)?;
        self.shortcuts.astar.validate(AlgorithmFamily::Astar)?;
        self.shortcuts.bidirectional.validate(AlgorithmFamily::Bidirectional)?;
        Ok(())
    }
}
