use serde::{Deserialize, Serialize};

use super::config::AdminConfig;

/// A resolved login session, as handed over by the authentication provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Login name, when the provider supplied one
    #[serde(default)]
    pub username: Option<String>,
}

impl Session {
    pub fn for_user(username: impl Into<String>) -> Self {
        Session {
            username: Some(username.into()),
        }
    }
}

/// Who is looking at the hub, reduced to the one signal visibility depends on.
///
/// Any session at all counts as authenticated. Admin rights are a separate,
/// stricter check; see [`AdminAllowlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewerIdentity {
    pub authenticated: bool,
}

impl ViewerIdentity {
    pub const ANONYMOUS: ViewerIdentity = ViewerIdentity {
        authenticated: false,
    };
    pub const AUTHENTICATED: ViewerIdentity = ViewerIdentity {
        authenticated: true,
    };

    /// Derive the identity from session presence. No session means anonymous.
    pub fn from_session(session: Option<&Session>) -> Self {
        ViewerIdentity {
            authenticated: session.is_some(),
        }
    }

    /// Whether a node with the given `private` flag is visible to this viewer
    pub fn can_see(self, private: bool) -> bool {
        !private || self.authenticated
    }
}

/// Usernames allowed onto the editing surface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminAllowlist {
    owner: Option<String>,
    users: Vec<String>,
}

impl AdminAllowlist {
    /// Build from the `[admin]` config section plus optional environment values.
    ///
    /// `owner_env` replaces the configured owner; `users_env` is a
    /// comma-separated list appended to the configured users. Blank entries are
    /// dropped everywhere.
    pub fn resolve(config: &AdminConfig, owner_env: Option<&str>, users_env: Option<&str>) -> Self {
        let owner = owner_env
            .or(config.owner.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let mut users: Vec<String> = config
            .users
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect();
        if let Some(extra) = users_env {
            users.extend(
                extra
                    .split(',')
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(str::to_string),
            );
        }

        AdminAllowlist { owner, users }
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn additional_users(&self) -> &[String] {
        &self.users
    }

    /// All allowed usernames, owner first
    pub fn allowed(&self) -> Vec<&str> {
        self.owner
            .iter()
            .map(String::as_str)
            .chain(self.users.iter().map(String::as_str))
            .collect()
    }

    /// Whether `username` may use the editing surface. Missing or empty names never are.
    pub fn is_admin(&self, username: Option<&str>) -> bool {
        match username {
            Some(name) if !name.is_empty() => self.allowed().contains(&name),
            _ => false,
        }
    }
}
