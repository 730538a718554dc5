//! Product browsing with the embedded cart.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use shop_cache::Cache;
use shop_commerce::prelude::*;

use crate::error::Result;
use crate::task::ScheduledTask;

/// Storage key of the cart snapshot.
pub const CART_KEY: &str = "cart";

type NoticeSlot = Arc<Mutex<Option<String>>>;

fn lock(slot: &Mutex<Option<String>>) -> MutexGuard<'_, Option<String>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn retain_currency(cart: Cart, currency: Currency) -> Cart {
    let (kept, foreign): (Vec<CartLine>, Vec<CartLine>) = cart
        .lines()
        .iter()
        .cloned()
        .partition(|line| line.product.price.currency == currency);
    if foreign.is_empty() {
        return cart;
    }
    for line in &foreign {
        tracing::warn!(
            product_id = %line.id(),
            currency = %line.product.price.currency,
            expected = %currency,
            "dropping cart line priced in a foreign currency"
        );
    }
    Cart::from_lines(kept)
}

/// The catalog screen.
///
/// Owns the filter state and the cart. The cart is rehydrated from storage
/// when the view is mounted and written back after every mutation. A write
/// failure is logged and otherwise ignored: the in-memory cart stays
/// authoritative for the rest of the session.
pub struct CatalogView {
    catalog: Arc<Catalog>,
    cache: Cache,
    cart: Cart,
    query: SearchQuery,
    cart_open: bool,
    notice: NoticeSlot,
    notice_delay: Duration,
    notice_timer: Option<ScheduledTask>,
}

impl CatalogView {
    /// Mount the view, restoring the cart from `cache`.
    ///
    /// A missing snapshot yields an empty cart, as does one that fails to
    /// parse. Lines priced in a currency other than the catalog's are
    /// dropped so the total can always be computed.
    pub fn mount(catalog: Arc<Catalog>, cache: Cache, notice_delay: Duration) -> Self {
        let cart = match cache.get::<Cart>(CART_KEY) {
            Ok(Some(cart)) => retain_currency(cart, catalog.currency()),
            Ok(None) => Cart::new(),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable cart snapshot");
                Cart::new()
            }
        };
        tracing::debug!(lines = cart.len(), "catalog view mounted");

        Self {
            catalog,
            cache,
            cart,
            query: SearchQuery::new(),
            cart_open: false,
            notice: Arc::new(Mutex::new(None)),
            notice_delay,
            notice_timer: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Replace the name search; empty input clears it.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.set_text(text);
    }

    /// Replace the category filter; empty input clears it.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.query.set_category(category);
    }

    /// Replace the price ceiling.
    pub fn set_max_price(&mut self, max: Option<Money>) {
        self.query.set_max_price(max);
    }

    /// Parse and set the price ceiling in the catalog currency. Blank input
    /// clears it.
    pub fn set_max_price_text(&mut self, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            self.query.set_max_price(None);
            return Ok(());
        }
        let max = Money::parse(input, self.catalog.currency())?;
        self.query.set_max_price(Some(max));
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.query.clear();
    }

    /// Products matching the current filters, in catalog order.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog.search(&self.query)
    }

    /// Distinct categories, for the category picker.
    pub fn categories(&self) -> Vec<&str> {
        self.catalog.categories()
    }

    /// Add one unit of the product `id` and post a notice.
    ///
    /// Returns the line's new quantity.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<u32> {
        let product = self.catalog.require(id)?.clone();
        let name = product.name.clone();
        let quantity = self.cart.add(product);
        self.persist();
        self.post_notice(format!("{name} added to cart!"));
        Ok(quantity)
    }

    /// Remove the line for `id`. Unknown ids are a no-op.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let removed = self.cart.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Change the quantity of the line for `id` by `delta`, flooring at one.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> Option<u32> {
        let quantity = self.cart.update_quantity(id, delta)?;
        self.persist();
        Some(quantity)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Total cost of the cart in the catalog currency.
    pub fn total_cost(&self) -> Result<Money> {
        Ok(self.cart.total(self.catalog.currency())?)
    }

    /// Number of distinct lines, as shown on the cart badge.
    pub fn badge_count(&self) -> usize {
        self.cart.len()
    }

    /// The current notice, if it has not expired.
    pub fn notice(&self) -> Option<String> {
        lock(&self.notice).clone()
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    fn post_notice(&mut self, text: String) {
        *lock(&self.notice) = Some(text);

        let slot = Arc::clone(&self.notice);
        // Replacing the old timer aborts it, so it cannot clear this notice.
        self.notice_timer = ScheduledTask::after(self.notice_delay, move || {
            *lock(&slot) = None;
        });
    }

    fn persist(&self) {
        match self.cache.set(CART_KEY, &self.cart) {
            Ok(()) => tracing::debug!(lines = self.cart.len(), "cart persisted"),
            Err(err) => tracing::warn!(error = %err, "failed to persist cart"),
        }
    }
}

impl std::fmt::Debug for CatalogView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogView")
            .field("cart", &self.cart)
            .field("query", &self.query)
            .field("cart_open", &self.cart_open)
            .field("notice", &self.notice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShopError;
    use shop_cache::{CacheError, KvStore};

    const NOTICE: Duration = Duration::from_millis(3000);

    fn mount(cache: &Cache) -> CatalogView {
        CatalogView::mount(Arc::new(Catalog::builtin()), cache.clone(), NOTICE)
    }

    fn id(n: u32) -> ProductId {
        ProductId::new(n)
    }

    /// Reads like an empty store and fails every write.
    struct ReadOnlyStore;

    impl KvStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> std::result::Result<(), CacheError> {
            Err(CacheError::Write(std::io::Error::other("read-only")))
        }

        fn delete(&self, _key: &str) -> std::result::Result<(), CacheError> {
            Err(CacheError::Write(std::io::Error::other("read-only")))
        }

        fn keys(&self) -> std::result::Result<Vec<String>, CacheError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_add_twice_merges_line() {
        let cache = Cache::memory();
        let mut view = mount(&cache);

        assert_eq!(view.add_to_cart(id(1)).unwrap(), 1);
        assert_eq!(view.add_to_cart(id(1)).unwrap(), 2);
        assert_eq!(view.badge_count(), 1);
        assert_eq!(view.cart().get(id(1)).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let mut view = mount(&Cache::memory());
        let err = view.add_to_cart(id(999)).unwrap_err();
        assert!(matches!(err, ShopError::Commerce(CommerceError::ProductNotFound(_))));
        assert!(view.cart().is_empty());
        assert!(view.notice().is_none());
    }

    #[tokio::test]
    async fn test_update_quantity_and_remove() {
        let mut view = mount(&Cache::memory());
        view.add_to_cart(id(2)).unwrap();

        assert_eq!(view.update_quantity(id(2), 3), Some(4));
        assert_eq!(view.update_quantity(id(2), -100), Some(1));
        assert_eq!(view.update_quantity(id(7), 1), None);

        assert!(!view.remove_from_cart(id(7)));
        assert_eq!(view.badge_count(), 1);
        assert!(view.remove_from_cart(id(2)));
        assert!(view.cart().is_empty());
    }

    #[tokio::test]
    async fn test_total_cost() {
        let mut view = mount(&Cache::memory());
        view.add_to_cart(id(1)).unwrap();
        view.add_to_cart(id(1)).unwrap();
        view.add_to_cart(id(2)).unwrap();

        // 2 x Rs.20 + 1 x Rs.30
        assert_eq!(view.total_cost().unwrap(), Money::from_major(70, Currency::INR));
    }

    #[tokio::test]
    async fn test_cart_survives_remount() {
        let cache = Cache::memory();
        {
            let mut view = mount(&cache);
            view.add_to_cart(id(3)).unwrap();
            view.add_to_cart(id(1)).unwrap();
            view.add_to_cart(id(3)).unwrap();
        }

        let view = mount(&cache);
        let lines: Vec<(u32, u32)> = view
            .cart()
            .lines()
            .iter()
            .map(|l| (l.id().get(), l.quantity))
            .collect();
        assert_eq!(lines, vec![(3, 2), (1, 1)]);
    }

    #[test]
    fn test_invalid_snapshot_yields_empty_cart() {
        let cache = Cache::memory();
        cache.set(CART_KEY, "not a cart").unwrap();

        let view = mount(&cache);
        assert!(view.cart().is_empty());
    }

    #[test]
    fn test_snapshot_is_normalized() {
        let cache = Cache::memory();
        let product = serde_json::to_value(Catalog::builtin().get(id(1)).unwrap()).unwrap();
        let mut low = product.clone();
        low["quantity"] = 0.into();
        let mut dup = product;
        dup["quantity"] = 2.into();
        cache.set(CART_KEY, &vec![low, dup]).unwrap();

        let view = mount(&cache);
        assert_eq!(view.badge_count(), 1);
        assert_eq!(view.cart().get(id(1)).unwrap().quantity, 3);
    }

    #[test]
    fn test_foreign_currency_snapshot_lines_are_dropped() {
        let cache = Cache::memory();
        let catalog = Catalog::builtin();
        let mut foreign = serde_json::to_value(catalog.get(id(1)).unwrap()).unwrap();
        foreign["price"] = serde_json::json!({ "amount_minor": 2000, "currency": "USD" });
        foreign["quantity"] = 1.into();
        let mut local = serde_json::to_value(catalog.get(id(2)).unwrap()).unwrap();
        local["quantity"] = 2.into();
        cache.set(CART_KEY, &vec![foreign, local]).unwrap();

        let view = mount(&cache);
        assert_eq!(view.badge_count(), 1);
        assert!(view.cart().get(id(1)).is_none());
        assert_eq!(view.total_cost().unwrap(), Money::from_major(60, Currency::INR));
    }

    #[tokio::test]
    async fn test_write_failure_keeps_cart() {
        let cache = Cache::new(ReadOnlyStore);
        let mut view = mount(&cache);

        assert_eq!(view.add_to_cart(id(1)).unwrap(), 1);
        assert_eq!(view.badge_count(), 1);
        assert!(view.notice().is_some());
    }

    #[test]
    fn test_filters() {
        let mut view = mount(&Cache::memory());
        assert_eq!(view.visible_products().len(), 12);

        view.set_category("");
        view.set_max_price(None);
        assert_eq!(view.visible_products().len(), 12);

        view.set_category("Garden");
        assert!(view.visible_products().is_empty());

        view.clear_filters();
        view.set_search("product 1");
        let names: Vec<&str> = view.visible_products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Product 1", "Product 10", "Product 11", "Product 12"]);

        view.clear_filters();
        view.set_max_price_text("Rs.40").unwrap();
        assert_eq!(view.visible_products().len(), 3);
        assert!(view.set_max_price_text("cheap").is_err());
        view.set_max_price_text("  ").unwrap();
        assert!(view.query().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_expires() {
        let mut view = mount(&Cache::memory());
        view.add_to_cart(id(4)).unwrap();
        assert_eq!(view.notice().as_deref(), Some("Product 4 added to cart!"));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(view.notice().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(view.notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_notice_restarts_timer() {
        let mut view = mount(&Cache::memory());
        view.add_to_cart(id(1)).unwrap();
        tokio::time::sleep(Duration::from_millis(2000)).await;
        view.add_to_cart(id(2)).unwrap();

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(view.notice().as_deref(), Some("Product 2 added to cart!"));

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(view.notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_notice_timer() {
        let mut view = mount(&Cache::memory());
        view.add_to_cart(id(1)).unwrap();
        let slot = Arc::clone(&view.notice);
        drop(view);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(lock(&slot).as_deref(), Some("Product 1 added to cart!"));
    }

    #[test]
    fn test_cart_modal() {
        let mut view = mount(&Cache::memory());
        assert!(!view.is_cart_open());
        view.open_cart();
        assert!(view.is_cart_open());
        view.close_cart();
        assert!(!view.is_cart_open());
    }
}
