// Path: crates/node/src/script.rs
//! Replay scripts: an ordered list of invocations in TOML.
//!
//! ```toml
//! [[invocation]]
//! function = "makeAsset"
//! args = ["car1", "blue"]
//! ```

use anyhow::{Context, Result};
use asset_registry_types::app::Invocation;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ReplayScript {
    #[serde(default, rename = "invocation")]
    pub invocations: Vec<Invocation>,
}

impl ReplayScript {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read replay script {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("failed to parse replay script {}", path.display()))
    }
}
