use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::io::config_io::{self, CONFIG_FILE};
use crate::model::hub::Hub;
use crate::model::navigation::NavigationTree;

/// Error type for hub I/O operations
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("not a navhub directory: no navhub.toml found")]
    NotAHub,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse navhub.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not parse navigation data in {path}: {source}")]
    NavigationParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the hub by walking up from the given directory, looking for
/// `navhub.toml`.
pub fn discover_hub(start: &Path) -> Result<PathBuf, HubError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(HubError::NotAHub);
        }
    }
}

/// Load a complete hub (config plus raw navigation tree) from `root`.
pub fn load_hub(root: &Path) -> Result<Hub, HubError> {
    let config = config_io::read_config(root)?;
    let navigation_path = root.join(&config.data.navigation);
    let tree = load_navigation(&navigation_path)?;

    info!(
        root = %root.display(),
        categories = tree.navigation_items.len(),
        items = tree.item_count(),
        "loaded hub"
    );

    Ok(Hub {
        navigation_path,
        config,
        tree,
    })
}

/// Read and parse a navigation JSON file.
///
/// A missing file is an error; a `null` document is an empty tree.
pub fn load_navigation(path: &Path) -> Result<NavigationTree, HubError> {
    let text = fs::read_to_string(path).map_err(|e| HubError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let tree = NavigationTree::from_json_str(&text).map_err(|e| HubError::NavigationParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), "parsed navigation data");
    Ok(tree)
}

/// Re-read the navigation file of an already loaded hub.
pub fn reload_navigation(hub: &mut Hub) -> Result<(), HubError> {
    hub.tree = load_navigation(&hub.navigation_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_hub(dir: &Path) {
        fs::write(
            dir.join(CONFIG_FILE),
            r#"
[site]
title = "Test Hub"

[data]
navigation = "data/navigation.json"
"#,
        )
        .unwrap();
        fs::create_dir_all(dir.join("data")).unwrap();
        fs::write(
            dir.join("data/navigation.json"),
            r#"{
  "navigationItems": [
    {
      "id": "dev",
      "title": "Development",
      "items": [
        { "id": "gh", "title": "GitHub", "href": "https://github.com" }
      ]
    }
  ]
}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_discover_hub() {
        let tmp = TempDir::new().unwrap();
        create_test_hub(tmp.path());

        let root = discover_hub(tmp.path()).unwrap();
        assert_eq!(root, tmp.path());

        // Discover from a subdirectory
        let root = discover_hub(&tmp.path().join("data")).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn test_discover_hub_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(discover_hub(tmp.path()), Err(HubError::NotAHub)));
    }

    #[test]
    fn test_load_hub() {
        let tmp = TempDir::new().unwrap();
        create_test_hub(tmp.path());

        let hub = load_hub(tmp.path()).unwrap();
        assert_eq!(hub.config.site.title, "Test Hub");
        assert_eq!(hub.navigation_path, tmp.path().join("data/navigation.json"));
        assert_eq!(hub.tree.navigation_items.len(), 1);
        assert_eq!(hub.tree.item_count(), 1);
    }

    #[test]
    fn test_missing_navigation_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        let err = load_hub(tmp.path()).unwrap_err();
        assert!(matches!(err, HubError::ReadError { .. }));
        assert!(err.to_string().contains("navigation.json"));
    }

    #[test]
    fn test_null_navigation_document() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        fs::write(tmp.path().join("navigation.json"), "null").unwrap();
        let hub = load_hub(tmp.path()).unwrap();
        assert!(hub.tree.is_empty());
    }

    #[test]
    fn test_malformed_navigation() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        fs::write(tmp.path().join("navigation.json"), "[1, 2").unwrap();
        assert!(matches!(
            load_hub(tmp.path()),
            Err(HubError::NavigationParseError { .. })
        ));
    }

    #[test]
    fn test_reload_navigation() {
        let tmp = TempDir::new().unwrap();
        create_test_hub(tmp.path());
        let mut hub = load_hub(tmp.path()).unwrap();

        fs::write(tmp.path().join("data/navigation.json"), r#"{"navigationItems": []}"#).unwrap();
        reload_navigation(&mut hub).unwrap();
        assert!(hub.tree.is_empty());
    }
}
