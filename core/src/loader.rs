//! Consumption of externally parsed configuration.
//!
//! The loader contract: files are parsed and interpolation-resolved outside
//! the core; the core only receives the resulting nested mapping and feeds it
//! through `Scope::update`. The helpers here turn serde documents into the
//! `Val::Map` transport and dispatch on file extension for the CLI.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

use crate::val::Val;

pub fn loads_json(text: &str) -> Result<Val> {
    let doc: serde_json::Value = serde_json::from_str(text)?;
    Ok(doc.into())
}

pub fn loads_yaml(text: &str) -> Result<Val> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text)?;
    Ok(doc.into())
}

pub fn loads_toml(text: &str) -> Result<Val> {
    let doc: toml::Value = toml::from_str(text)?;
    Ok(doc.into())
}

/// Parse a config file into the overrides transport, by extension.
pub fn load_path(path: &Path) -> Result<Val> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match ext {
        "json" => loads_json(&text),
        "yaml" | "yml" => loads_yaml(&text),
        "toml" => loads_toml(&text),
        other => bail!("unsupported config format `{other}` for {}", path.display()),
    }
}
