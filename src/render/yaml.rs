use crate::error::{ConvertError, Result};
use crate::model::ConfigTree;
use log::info;
use std::fs;
use std::path::Path;

/// Render the tree as block-style YAML.
pub fn to_yaml(tree: &ConfigTree) -> Result<String> {
    Ok(serde_yaml::to_string(tree)?)
}

/// Render and write the tree to `path`, replacing any existing file.
pub fn write_yaml(tree: &ConfigTree, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!("Starting to convert tree to YAML file: {}", path.display());

    let yaml = to_yaml(tree)?;
    fs::write(path, yaml).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("YAML file created at: {}", path.display());
    Ok(())
}
