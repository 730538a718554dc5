//! The storefront application.

use std::sync::Arc;

use shop_auth::{Identity, SessionStore};
use shop_cache::Cache;
use shop_commerce::Catalog;
use shop_router::{Navigation, Route, RouteGuard, Screen};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::ShopConfig;
use crate::error::{Result, ShopError};
use crate::task::ScheduledTask;
use crate::views::{CatalogView, LoginView, RegisterView, SubmitOutcome};

/// The view currently mounted.
#[derive(Debug)]
pub enum ActiveView {
    Register(RegisterView),
    Login(LoginView),
    Catalog(CatalogView),
    /// Holds the unmatched path.
    NotFound(String),
}

impl ActiveView {
    /// Screen this view renders.
    pub fn screen(&self) -> Screen {
        match self {
            ActiveView::Register(_) => Screen::Register,
            ActiveView::Login(_) => Screen::Login,
            ActiveView::Catalog(_) => Screen::Catalog,
            ActiveView::NotFound(_) => Screen::NotFound,
        }
    }
}

/// Storefront application.
///
/// Owns the session store, the durable cache and the catalog, and mounts
/// one view at a time. Navigation always goes through the route guard.
///
/// # Example
///
/// ```
/// use shop_cache::Cache;
/// use shop_core::prelude::*;
///
/// let mut app = Storefront::new(ShopConfig::default(), Cache::memory());
/// assert_eq!(app.screen(), Screen::Login);
///
/// app.navigate("/home");
/// assert_eq!(app.screen(), Screen::Login);
/// ```
pub struct Storefront {
    config: ShopConfig,
    sessions: SessionStore,
    cache: Cache,
    catalog: Arc<Catalog>,
    guard: RouteGuard,
    route: Option<Route>,
    view: ActiveView,
    redirect_tx: UnboundedSender<Route>,
    redirect_rx: UnboundedReceiver<Route>,
    redirect_timer: Option<ScheduledTask>,
}

impl Storefront {
    /// Create a storefront over the built-in catalog, starting at `/`.
    pub fn new(config: ShopConfig, cache: Cache) -> Self {
        Self::with_catalog(config, cache, Catalog::builtin())
    }

    /// Create a storefront over `catalog`, starting at `/`.
    pub fn with_catalog(config: ShopConfig, cache: Cache, catalog: Catalog) -> Self {
        let (redirect_tx, redirect_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            config,
            sessions: SessionStore::new(),
            cache,
            catalog: Arc::new(catalog),
            guard: RouteGuard::new(),
            route: None,
            view: ActiveView::NotFound(String::new()),
            redirect_tx,
            redirect_rx,
            redirect_timer: None,
        };
        app.navigate(Route::Root.path());
        app
    }

    /// Navigate to `path`, following a guard redirect if there is one.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let navigation = self.guard.resolve(path, self.sessions.current_user());
        let (route, screen) = match navigation {
            Navigation::Render(screen) => (Route::parse(path), screen),
            Navigation::Redirect { to, .. } => (Some(to), navigation.screen()),
        };
        tracing::info!(path, screen = ?screen, "navigate");
        self.mount(route, screen, path);
        navigation
    }

    fn mount(&mut self, route: Option<Route>, screen: Screen, path: &str) {
        // A pending redirect belongs to the view being replaced.
        self.redirect_timer = None;
        while self.redirect_rx.try_recv().is_ok() {}

        self.route = route;
        self.view = match screen {
            Screen::Register => ActiveView::Register(RegisterView::new()),
            Screen::Login => ActiveView::Login(LoginView::new()),
            Screen::Catalog => ActiveView::Catalog(CatalogView::mount(
                Arc::clone(&self.catalog),
                self.cache.clone(),
                self.config.notice_delay(),
            )),
            Screen::NotFound => ActiveView::NotFound(path.to_string()),
        };
    }

    /// Submit whichever entry form is mounted.
    ///
    /// On success the redirect is scheduled after the configured delay;
    /// call [`Storefront::poll`] or [`Storefront::wait_for_redirect`] to
    /// apply it.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let outcome = match &mut self.view {
            ActiveView::Register(view) => view.submit(&mut self.sessions),
            ActiveView::Login(view) => view.submit(&mut self.sessions),
            other => {
                return Err(ShopError::WrongScreen {
                    action: "submit",
                    screen: other.screen(),
                })
            }
        };

        if let SubmitOutcome::Accepted { redirect } = outcome {
            self.schedule_redirect(redirect);
        }
        Ok(outcome)
    }

    fn schedule_redirect(&mut self, to: Route) {
        let tx = self.redirect_tx.clone();
        self.redirect_timer = ScheduledTask::after(self.config.redirect_delay(), move || {
            let _ = tx.send(to);
        });

        if self.redirect_timer.is_none() {
            // No runtime to wait on.
            self.navigate(to.path());
        }
    }

    /// Check if a redirect is scheduled and not yet applied.
    pub fn has_pending_redirect(&self) -> bool {
        self.redirect_timer.is_some()
    }

    /// Apply a redirect whose delay has elapsed.
    pub fn poll(&mut self) -> Option<Navigation> {
        let to = self.redirect_rx.try_recv().ok()?;
        Some(self.navigate(to.path()))
    }

    /// Wait for the pending redirect, if any, and apply it.
    pub async fn wait_for_redirect(&mut self) -> Option<Navigation> {
        self.redirect_timer.as_ref()?;
        let to = self.redirect_rx.recv().await?;
        Some(self.navigate(to.path()))
    }

    /// Dismiss the entry form's message along with the store's error.
    pub fn dismiss_flash(&mut self) {
        match &mut self.view {
            ActiveView::Register(view) => view.dismiss_flash(),
            ActiveView::Login(view) => view.dismiss_flash(),
            _ => {}
        }
        self.sessions.dismiss_error();
    }

    /// End the session and return to the login form.
    pub fn logout(&mut self) -> Navigation {
        self.sessions.logout();
        self.navigate(Route::Login.path())
    }

    /// Screen on display.
    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    /// Route on display, or `None` on the not-found screen.
    pub fn route(&self) -> Option<Route> {
        self.route
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn register_view(&mut self) -> Result<&mut RegisterView> {
        match &mut self.view {
            ActiveView::Register(view) => Ok(view),
            other => Err(wrong_screen("register", other)),
        }
    }

    pub fn login_view(&mut self) -> Result<&mut LoginView> {
        match &mut self.view {
            ActiveView::Login(view) => Ok(view),
            other => Err(wrong_screen("login", other)),
        }
    }

    pub fn catalog_view(&mut self) -> Result<&mut CatalogView> {
        match &mut self.view {
            ActiveView::Catalog(view) => Ok(view),
            other => Err(wrong_screen("browse", other)),
        }
    }

    /// The signed-in identity, if any.
    pub fn current_user(&self) -> Option<&Identity> {
        self.sessions.current_user()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }
}

fn wrong_screen(action: &'static str, view: &ActiveView) -> ShopError {
    ShopError::WrongScreen {
        action,
        screen: view.screen(),
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("route", &self.route)
            .field("view", &self.view)
            .field("user", &self.current_user().map(Identity::email))
            .field("pending_redirect", &self.has_pending_redirect())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_auth::Field;
    use std::time::Duration;

    fn app() -> Storefront {
        Storefront::new(ShopConfig::default(), Cache::memory())
    }

    #[test]
    fn test_starts_on_login() {
        let app = app();
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(app.route(), Some(Route::Login));
    }

    #[test]
    fn test_unknown_path() {
        let mut app = app();
        assert_eq!(app.navigate("/checkout"), Navigation::Render(Screen::NotFound));
        assert_eq!(app.route(), None);
        assert!(matches!(app.view(), ActiveView::NotFound(path) if path == "/checkout"));
    }

    #[test]
    fn test_dismiss_flash_clears_store_error() {
        let mut app = app();
        let form = app.login_view().unwrap();
        form.set_email("nobody@example.com");
        form.set_password("hunter22");
        assert!(matches!(app.submit().unwrap(), SubmitOutcome::Rejected(_)));
        assert!(app.sessions().error().is_some());
        assert!(app.login_view().unwrap().flash().is_some());

        app.dismiss_flash();
        assert!(app.sessions().error().is_none());
        assert!(app.login_view().unwrap().flash().is_none());
    }

    #[test]
    fn test_wrong_screen() {
        let mut app = app();
        assert!(matches!(
            app.catalog_view(),
            Err(ShopError::WrongScreen { screen: Screen::Login, .. })
        ));

        app.navigate("/missing");
        assert!(app.submit().is_err());
    }

    #[test]
    fn test_submit_without_runtime_redirects_immediately() {
        let mut app = app();
        app.navigate("/register");
        let form = app.register_view().unwrap();
        form.set(Field::Name, "Asha Rao");
        form.set(Field::Email, "asha@example.com");
        form.set(Field::Password, "hunter22");

        let outcome = app.submit().unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted { redirect: Route::Login });
        assert_eq!(app.screen(), Screen::Login);
        assert!(!app.has_pending_redirect());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_redirects_after_delay() {
        let mut app = app();
        app.sessions.register("Asha", "asha@example.com", "hunter22").unwrap();

        let form = app.login_view().unwrap();
        form.set_email("asha@example.com");
        form.set_password("hunter22");
        app.submit().unwrap();

        assert_eq!(app.screen(), Screen::Login);
        assert!(app.has_pending_redirect());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(app.poll().is_none());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(app.poll(), Some(Navigation::Render(Screen::Catalog)));
        assert_eq!(app.route(), Some(Route::Home));
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigating_away_cancels_redirect() {
        let mut app = app();
        app.sessions.register("Asha", "asha@example.com", "hunter22").unwrap();

        let form = app.login_view().unwrap();
        form.set_email("asha@example.com");
        form.set_password("hunter22");
        app.submit().unwrap();

        app.navigate("/register");
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(app.poll().is_none());
        assert_eq!(app.screen(), Screen::Register);
    }

    #[test]
    fn test_logout_returns_to_login() {
        let mut app = app();
        app.sessions.register("Asha", "asha@example.com", "hunter22").unwrap();
        app.sessions.login("asha@example.com", "hunter22").unwrap();
        app.navigate("/dashboard");
        assert_eq!(app.screen(), Screen::Catalog);

        app.logout();
        assert_eq!(app.screen(), Screen::Login);
        assert!(app.current_user().is_none());

        app.navigate("/home");
        assert_eq!(app.screen(), Screen::Login);
    }
}
