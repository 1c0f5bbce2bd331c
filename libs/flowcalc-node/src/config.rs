//! Node configuration
//!
//! A node is configured with a formula and an optional display name.
//! Configuration is loaded from a YAML or JSON file with environment
//! overrides (`FLOWCALC_` prefix).

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{NodeError, Result};

/// Calculator node configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Display label used in log output
    #[serde(default)]
    pub name: Option<String>,
    /// Arithmetic formula referencing input slots as `$0`..`$9`
    pub formula: String,
}

impl NodeConfig {
    /// Validate the configuration. A missing formula is a hard
    /// initialization failure; everything else is optional.
    pub fn validate(&self) -> Result<()> {
        if self.formula.trim().is_empty() {
            return Err(NodeError::config("formula must not be empty"));
        }
        Ok(())
    }
}

/// Load node configuration from a file, with `FLOWCALC_`-prefixed
/// environment variables taking precedence.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<NodeConfig> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| NodeError::config("config file must have an extension"))?;

    let figment = match extension {
        "yaml" | "yml" => Figment::new().merge(Yaml::file(path)),
        "json" => Figment::new().merge(Json::file(path)),
        _ => {
            return Err(NodeError::config(format!(
                "unsupported config file format: {}",
                extension
            )))
        }
    };

    let config: NodeConfig = figment
        .merge(Env::prefixed("FLOWCALC_"))
        .extract()
        .map_err(|e| NodeError::config(format!("failed to load configuration: {}", e)))?;

    config.validate()?;
    Ok(config)
}
