use std::fs;
use std::path::Path;

use crate::io::hub_io::HubError;
use crate::model::config::HubConfig;
use crate::model::viewer::AdminAllowlist;

pub const CONFIG_FILE: &str = "navhub.toml";

/// Replaces `[admin] owner`
pub const OWNER_ENV: &str = "NAVHUB_OWNER";
/// Comma-separated usernames appended to `[admin] users`
pub const ADMIN_USERS_ENV: &str = "NAVHUB_ADMIN_USERS";

/// Read and parse `navhub.toml` from the hub root.
pub fn read_config(root: &Path) -> Result<HubConfig, HubError> {
    let config_path = root.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| HubError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: HubConfig = toml::from_str(&config_text)?;
    Ok(config)
}

/// Resolve the admin allowlist from config plus the process environment.
pub fn admin_allowlist(config: &HubConfig) -> AdminAllowlist {
    let owner = std::env::var(OWNER_ENV).ok();
    let users = std::env::var(ADMIN_USERS_ENV).ok();
    AdminAllowlist::resolve(&config.admin, owner.as_deref(), users.as_deref())
}
