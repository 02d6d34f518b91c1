//! Squad landing route and widget flags.

use std::collections::BTreeMap;

use tracing::warn;

use squadfeed_core::types::Route;

/// Landing path used until the host page asks for another one.
pub const DEFAULT_LANDING: &str = "/feed";

/// Route parameter name per squad target.
fn param_name(target: &str) -> Option<&'static str> {
    match target {
        "user" => Some("id"),
        _ => None,
    }
}

/// Parse a squad parameter such as `user:42_comments`.
///
/// `user:42_comments` becomes the route named `user-id` with param
/// `id = 42` and query flag `comments`. Unknown targets and strings
/// without a `:` yield `None`.
pub fn parse_squad_route(raw: &str) -> Option<Route> {
    let (target, param) = raw.split_once(':')?;
    let key = param_name(target)?;
    let (value, suffix) = match param.split_once('_') {
        Some((value, suffix)) => (value, Some(suffix)),
        None => (param, None),
    };

    let mut route = Route::named(format!("{target}-{key}"));
    route.params.insert(key.to_string(), value.to_string());
    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        route.query = BTreeMap::from([(suffix.to_string(), true)]);
    }
    Some(route)
}

/// Widget-level routing state.
#[derive(Debug, Clone)]
pub struct SquadState {
    /// Where the widget lands after authentication.
    pub route: Route,
    /// Whether the widget is open.
    pub widget_open: bool,
}

impl Default for SquadState {
    fn default() -> Self {
        Self {
            route: Route::path(DEFAULT_LANDING),
            widget_open: false,
        }
    }
}

impl SquadState {
    /// Replace the landing route from a squad parameter; invalid input keeps the old route.
    pub fn set_params(&mut self, raw: &str) {
        match parse_squad_route(raw) {
            Some(route) => self.route = route,
            None => warn!(squad = raw, "Ignoring unrecognized squad parameter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_route_with_suffix() {
        let route = parse_squad_route("user:42_comments").unwrap();
        assert_eq!(route.name.as_deref(), Some("user-id"));
        assert_eq!(route.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(route.query.get("comments"), Some(&true));
    }

    #[test]
    fn test_parse_user_route_without_suffix() {
        let route = parse_squad_route("user:7").unwrap();
        assert_eq!(route.params.get("id").map(String::as_str), Some("7"));
        assert!(route.query.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_or_malformed() {
        assert!(parse_squad_route("shop:1").is_none());
        assert!(parse_squad_route("user").is_none());
    }

    #[test]
    fn test_default_landing_and_invalid_params() {
        let mut squad = SquadState::default();
        assert_eq!(squad.route.path.as_deref(), Some(DEFAULT_LANDING));
        squad.set_params("nonsense");
        assert_eq!(squad.route, Route::path(DEFAULT_LANDING));
    }
}
