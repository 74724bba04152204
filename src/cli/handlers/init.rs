use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::config_io::CONFIG_FILE;
use crate::io::hub_io;

const CONFIG_TEMPLATE: &str = r##"[site]
title = {title}
description = ""

[data]
# Path to the navigation JSON, relative to this file
navigation = "navigation.json"

[admin]
{owner}
# Extra admins. NAVHUB_ADMIN_USERS (comma-separated) extends this list and
# NAVHUB_OWNER replaces the owner.
users = []

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
# sidebar_open = true
#
# [ui.colors]
# background = "#0C001B"
# text = "#A09BFE"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#5A5580"
# private = "#FFD700"
# link = "#44DDFF"
"##;

const NAVIGATION_TEMPLATE: &str = r##"{
  "navigationItems": [
    {
      "id": "getting-started",
      "title": "Getting Started",
      "items": [
        {
          "id": "rust",
          "title": "Rust",
          "href": "https://www.rust-lang.org",
          "description": "A language empowering everyone"
        }
      ]
    },
    {
      "id": "internal",
      "title": "Internal",
      "private": true,
      "items": [
        {
          "id": "dashboard",
          "title": "Dashboard",
          "href": "https://dashboard.example.com",
          "description": "Only visible when signed in"
        }
      ]
    }
  ]
}
"##;

/// Infer a site title from a directory name: replace hyphens with spaces, title-case.
fn infer_title(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote `s` as a TOML string value.
fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

/// Substitute `{name}` placeholders in one pass, so substituted text is never
/// scanned for further placeholders.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(*key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render navhub.toml with the title and owner filled in.
fn render_config(title: &str, owner: Option<&str>) -> String {
    let owner_line = match owner {
        Some(owner) => format!("owner = {}", toml_string(owner)),
        None => "# owner = \"your-github-login\"".to_string(),
    };
    let title = toml_string(title);
    fill_placeholders(
        CONFIG_TEMPLATE,
        &[("{title}", title.as_str()), ("{owner}", owner_line.as_str())],
    )
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);

    // Check if already initialized
    if config_path.is_file() && !args.force {
        return Err(format!("{} already exists (use --force to overwrite)", CONFIG_FILE).into());
    }

    // Check for parent hub and warn
    if let Some(parent) = cwd.parent()
        && let Ok(parent_root) = hub_io::discover_hub(parent)
    {
        eprintln!("Note: parent hub found at {}/", parent_root.display());
        eprintln!("Creating new hub in ./");
    }

    let title = args.title.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .map(infer_title)
            .unwrap_or_else(|| "NavHub".to_string())
    });

    fs::write(&config_path, render_config(&title, args.owner.as_deref()))?;

    // Never clobber existing navigation data, even with --force
    let navigation_path = cwd.join("navigation.json");
    let wrote_navigation = !navigation_path.exists();
    if wrote_navigation {
        fs::write(&navigation_path, NAVIGATION_TEMPLATE)?;
    }

    println!("Initialized hub: {}", title);
    if wrote_navigation {
        println!("  created navigation.json with sample links");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::HubConfig;
    use crate::model::navigation::NavigationTree;

    #[test]
    fn test_infer_title() {
        assert_eq!(infer_title("my-link-hub"), "My Link Hub");
        assert_eq!(infer_title("links"), "Links");
    }

    #[test]
    fn test_render_config_parses() {
        let config: HubConfig = toml::from_str(&render_config("Team Links", Some("octocat"))).unwrap();
        assert_eq!(config.site.title, "Team Links");
        assert_eq!(config.admin.owner.as_deref(), Some("octocat"));
        assert!(config.admin.users.is_empty());
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn test_render_config_without_owner() {
        let text = render_config("Links", None);
        assert!(text.contains("# owner = "));
        let config: HubConfig = toml::from_str(&text).unwrap();
        assert!(config.admin.owner.is_none());
    }

    #[test]
    fn test_render_config_escapes_values() {
        let text = render_config("Bob's \"Links\"", Some("octo\\cat"));
        let config: HubConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.site.title, "Bob's \"Links\"");
        assert_eq!(config.admin.owner.as_deref(), Some("octo\\cat"));
    }

    #[test]
    fn test_render_config_leaves_placeholder_text_in_values() {
        let text = render_config("{owner} links", Some("{title}"));
        let config: HubConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.site.title, "{owner} links");
        assert_eq!(config.admin.owner.as_deref(), Some("{title}"));
    }

    #[test]
    fn test_navigation_template_parses() {
        let tree = NavigationTree::from_json_str(NAVIGATION_TEMPLATE).unwrap();
        assert_eq!(tree.navigation_items.len(), 2);
        assert!(tree.navigation_items[1].private);
    }
}
