use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from navhub.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            title: default_site_title(),
            description: String::new(),
        }
    }
}

fn default_site_title() -> String {
    "NavHub".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Navigation JSON file, relative to the directory holding navhub.toml
    #[serde(default = "default_navigation_file")]
    pub navigation: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            navigation: default_navigation_file(),
        }
    }
}

fn default_navigation_file() -> String {
    "navigation.json".to_string()
}

/// Who may use the editing surface. Environment overrides are applied by
/// `io::config_io::admin_allowlist`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Whether the sidebar starts open
    #[serde(default)]
    pub sidebar_open: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            sidebar_open: false,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: HubConfig = toml::from_str("").unwrap();
        assert_eq!(config.site.title, "NavHub");
        assert_eq!(config.data.navigation, "navigation.json");
        assert!(config.admin.owner.is_none());
        assert!(config.ui.show_key_hints);
        assert!(!config.ui.sidebar_open);
    }

    #[test]
    fn full_config() {
        let config: HubConfig = toml::from_str(
            r##"
[site]
title = "Links"
description = "Team bookmarks"

[data]
navigation = "data/nav.json"

[admin]
owner = "octocat"
users = ["alice"]

[ui]
show_key_hints = false
sidebar_open = true

[ui.colors]
background = "#000000"
"##,
        )
        .unwrap();
        assert_eq!(config.site.title, "Links");
        assert_eq!(config.data.navigation, "data/nav.json");
        assert_eq!(config.admin.owner.as_deref(), Some("octocat"));
        assert_eq!(config.admin.users, vec!["alice"]);
        assert!(!config.ui.show_key_hints);
        assert!(config.ui.sidebar_open);
        assert_eq!(config.ui.colors.get("background").map(String::as_str), Some("#000000"));
    }
}
