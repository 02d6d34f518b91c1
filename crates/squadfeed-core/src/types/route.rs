//! Navigation targets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the landing (home) route.
pub const HOME_ROUTE_NAME: &str = "index";

/// Path of the landing (home) route.
pub const HOME_PATH: &str = "/";

/// A navigation target: either a plain path or a named route with params.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Named route, e.g. `user-id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Literal path, e.g. `/feed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Route params.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    /// Query flags.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, bool>,
}

impl Route {
    /// Route addressed by path only.
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Route addressed by name only.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The landing route (`/`).
    pub fn home() -> Self {
        Self::path(HOME_PATH)
    }

    /// Whether this is the landing route, by name or by path.
    pub fn is_home(&self) -> bool {
        self.name.as_deref() == Some(HOME_ROUTE_NAME) || self.path.as_deref() == Some(HOME_PATH)
    }
}
