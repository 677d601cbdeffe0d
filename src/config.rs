//! Engine configuration.
//!
//! Tunable constants for every engine, grouped per engine. The whole document
//! is serde-serializable so a presentation layer can keep it alongside its own
//! settings and hand it back as JSON.

use serde::{Deserialize, Serialize};

/// Settings for the random graph generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Inset from every canvas edge inside which nodes are placed
    pub margin: f64,
    /// Number of nearest neighbours each node is connected to
    pub neighbor_count: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            neighbor_count: 3,
        }
    }
}

/// Settings for the sorting tracers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Maximum number of full shuffles bogo sort performs
    pub bogo_attempt_cap: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            bogo_attempt_cap: 500,
        }
    }
}

/// Spacing used by the tree layout passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeLayoutConfig {
    /// Vertical distance between consecutive depths
    pub level_spacing: f64,
    /// Horizontal distance between consecutive leaves
    pub sibling_spacing: f64,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            level_spacing: 60.0,
            sibling_spacing: 50.0,
        }
    }
}

/// Settings for the Boolean logic engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicConfig {
    /// Largest number of distinct variables a truth table may span
    pub max_variables: usize,
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self { max_variables: 12 }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub graph: GraphConfig,
    pub sorting: SortConfig,
    pub tree_layout: TreeLayoutConfig,
    pub logic: LogicConfig,
}

impl EngineConfig {
    /// Creates a configuration with default values for every engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document.
    ///
    /// Missing sections and fields keep their default values.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a configuration with a default fallback.
    ///
    /// Returns the parsed document if one is given and valid, otherwise the
    /// default configuration.
    ///
    /// # Examples
    /// ```
    /// use algotrace::EngineConfig;
    ///
    /// let config = EngineConfig::load(Some(r#"{"sorting": {"bogo_attempt_cap": 10}}"#));
    /// assert_eq!(config.sorting.bogo_attempt_cap, 10);
    /// assert_eq!(config.graph.neighbor_count, 3);
    ///
    /// let fallback = EngineConfig::load(Some("not json"));
    /// assert_eq!(fallback, EngineConfig::default());
    /// ```
    pub fn load(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json_str(json) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "invalid engine configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
