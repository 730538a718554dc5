//! Route table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A known storefront route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// `/`, which only ever redirects.
    Root,
    Register,
    Login,
    Home,
    /// Alias of [`Route::Home`].
    Dashboard,
}

impl Route {
    /// Every route, in table order.
    pub const ALL: [Route; 5] = [
        Route::Root,
        Route::Register,
        Route::Login,
        Route::Home,
        Route::Dashboard,
    ];

    /// Parse a path into a route.
    ///
    /// A trailing slash and a query string or fragment are ignored, so
    /// `/home/?q=x` resolves to [`Route::Home`]. Returns `None` for unknown
    /// paths.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Root),
            "/register" => Some(Route::Register),
            "/login" => Some(Route::Login),
            "/home" => Some(Route::Home),
            "/dashboard" => Some(Route::Dashboard),
            _ => None,
        }
    }

    /// Canonical path.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Register => "/register",
            Route::Login => "/login",
            Route::Home => "/home",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Check if the route needs an active session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Home | Route::Dashboard)
    }

    /// Screen rendered for this route, or `None` for redirect-only routes.
    pub fn screen(&self) -> Option<Screen> {
        match self {
            Route::Root => None,
            Route::Register => Some(Screen::Register),
            Route::Login => Some(Screen::Login),
            Route::Home | Route::Dashboard => Some(Screen::Catalog),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Error returned when parsing an unknown path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(pub String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no route for {}", self.0)
    }
}

impl std::error::Error for UnknownRoute {}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

/// What the storefront renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Register,
    Login,
    Catalog,
    NotFound,
}

impl Screen {
    /// Screen title.
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Register => "Create Account",
            Screen::Login => "Welcome Back",
            Screen::Catalog => "Products",
            Screen::NotFound => "Page Not Found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_ignores_trailing_slash_and_query() {
        assert_eq!(Route::parse("/home/"), Some(Route::Home));
        assert_eq!(Route::parse("/login?next=/home"), Some(Route::Login));
        assert_eq!(Route::parse("/register#top"), Some(Route::Register));
        assert_eq!(Route::parse(""), Some(Route::Root));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Route::parse("/checkout"), None);
        assert_eq!(Route::parse("/HOME"), None);
        assert!("/nope".parse::<Route>().is_err());
    }

    #[test]
    fn test_protected_routes() {
        let protected: Vec<Route> = Route::ALL.into_iter().filter(Route::is_protected).collect();
        assert_eq!(protected, vec![Route::Home, Route::Dashboard]);
    }

    #[test]
    fn test_dashboard_is_catalog_alias() {
        assert_eq!(Route::Dashboard.screen(), Route::Home.screen());
        assert_eq!(Route::Root.screen(), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Route::Home).unwrap(), "\"home\"");
        assert_eq!(serde_json::to_string(&Screen::NotFound).unwrap(), "\"not_found\"");
    }
}
