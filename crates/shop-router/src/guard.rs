//! Session guard for protected routes.

use crate::route::{Route, Screen};
use serde::Serialize;
use shop_auth::Identity;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "to")]
pub enum GuardDecision {
    /// Render the route.
    Allow,
    /// Send the user to another route instead.
    Redirect(Route),
}

/// Result of navigating to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "target")]
pub enum Navigation {
    /// Render a screen for the requested route.
    Render(Screen),
    /// The requested route redirected; render `to` instead.
    Redirect { from: Route, to: Route },
}

impl Navigation {
    /// Screen that ends up on display.
    pub fn screen(&self) -> Screen {
        match self {
            Navigation::Render(screen) => *screen,
            // Redirect targets are always public routes with a screen.
            Navigation::Redirect { to, .. } => to.screen().unwrap_or(Screen::NotFound),
        }
    }

    /// Redirect target, if the navigation redirected.
    pub fn landing(&self) -> Option<Route> {
        match self {
            Navigation::Render(_) => None,
            Navigation::Redirect { to, .. } => Some(*to),
        }
    }
}

/// Gates protected routes on session state.
///
/// Session restoration is synchronous, so the guard never has to wait:
/// a check either allows the route or redirects to the login form.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard {
    _private: (),
}

impl RouteGuard {
    /// Create a guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `route` may be rendered for `session`.
    ///
    /// `/` always redirects to `/login`. Protected routes redirect to
    /// `/login` without a session. Everything else is allowed.
    pub fn check(&self, route: Route, session: Option<&Identity>) -> GuardDecision {
        if route == Route::Root {
            return GuardDecision::Redirect(Route::Login);
        }
        if route.is_protected() && session.is_none() {
            return GuardDecision::Redirect(Route::Login);
        }
        GuardDecision::Allow
    }

    /// Resolve `path` to what should be displayed.
    pub fn resolve(&self, path: &str, session: Option<&Identity>) -> Navigation {
        let Some(route) = Route::parse(path) else {
            tracing::debug!(path, "no route");
            return Navigation::Render(Screen::NotFound);
        };

        match self.check(route, session) {
            GuardDecision::Allow => {
                tracing::debug!(%route, "route allowed");
                Navigation::Render(route.screen().unwrap_or(Screen::NotFound))
            }
            GuardDecision::Redirect(to) => {
                tracing::debug!(from = %route, %to, "route redirected");
                Navigation::Redirect { from: route, to }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Identity {
        Identity::new("Asha", "asha@example.com", "hunter22")
    }

    #[test]
    fn test_public_routes_allowed_without_session() {
        let guard = RouteGuard::new();
        assert_eq!(guard.check(Route::Login, None), GuardDecision::Allow);
        assert_eq!(guard.check(Route::Register, None), GuardDecision::Allow);
    }

    #[test]
    fn test_protected_routes_redirect_without_session() {
        let guard = RouteGuard::new();
        assert_eq!(guard.check(Route::Home, None), GuardDecision::Redirect(Route::Login));
        assert_eq!(
            guard.check(Route::Dashboard, None),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_protected_routes_allowed_with_session() {
        let guard = RouteGuard::new();
        let user = user();
        assert_eq!(guard.check(Route::Home, Some(&user)), GuardDecision::Allow);
        assert_eq!(guard.check(Route::Dashboard, Some(&user)), GuardDecision::Allow);
    }

    #[test]
    fn test_root_always_redirects_to_login() {
        let guard = RouteGuard::new();
        let user = user();
        assert_eq!(guard.check(Route::Root, None), GuardDecision::Redirect(Route::Login));
        assert_eq!(
            guard.check(Route::Root, Some(&user)),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_resolve() {
        let guard = RouteGuard::new();
        let user = user();

        assert_eq!(guard.resolve("/home", Some(&user)), Navigation::Render(Screen::Catalog));
        assert_eq!(guard.resolve("/missing", Some(&user)), Navigation::Render(Screen::NotFound));

        let nav = guard.resolve("/dashboard", None);
        assert_eq!(nav, Navigation::Redirect { from: Route::Dashboard, to: Route::Login });
        assert_eq!(nav.screen(), Screen::Login);
        assert_eq!(nav.landing(), Some(Route::Login));
    }
}
