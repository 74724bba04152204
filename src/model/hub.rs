use std::path::PathBuf;

use super::config::HubConfig;
use super::navigation::NavigationTree;

/// A fully loaded hub
#[derive(Debug, Clone)]
pub struct Hub {
    /// Resolved path of the navigation JSON file
    pub navigation_path: PathBuf,
    /// Parsed navhub.toml
    pub config: HubConfig,
    /// The raw, unfiltered tree
    pub tree: NavigationTree,
}
