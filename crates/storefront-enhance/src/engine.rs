//! The enhancement engine.
//!
//! `Enhancer` is the component instance replacing the page-lifetime globals
//! of the storefront script: observers and timers live inside it, scoped by
//! explicit `start`/`stop`. Events are routed synchronously; only the cart
//! and suggest calls are async. Network failures are caught and logged,
//! never surfaced, since the runtime enhances rather than gates the page.

use std::sync::Arc;
use std::time::Instant;

use storefront_core::{
    attrs, Action, EnhanceConfig, NodeId, Page, PageEvent, ProductId, VitalsEntry, VitalsObserver,
};
use storefront_net::{CartClient, HttpTransport, SuggestClient};
use tracing::{debug, error, info};

use crate::delegate::{dispatch_click, ClickOutcome};
use crate::error::EnhanceError;
use crate::guard::SubmitGuard;
use crate::lazy::LazyLoader;
use crate::notify::{NotificationCenter, Severity};
use crate::search::SearchBox;
use crate::throttle::{Debouncer, FrameThrottle};

/// Message shown after a successful add-to-cart.
pub const CART_ADDED_MESSAGE: &str = "Product added to cart!";

/// What an event produced, for the host driving the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The event's default behavior should be suppressed.
    pub default_prevented: bool,
    /// A frame callback should be scheduled (deliver `PageEvent::Frame`).
    pub frame_requested: bool,
}

/// The storefront enhancement engine.
pub struct Enhancer<T> {
    config: EnhanceConfig,
    cart: CartClient<T>,
    suggest: SuggestClient<T>,
    lazy: LazyLoader,
    search: Option<SearchBox>,
    scroll: FrameThrottle,
    resize: Debouncer,
    notifications: NotificationCenter,
    guard: SubmitGuard,
    vitals: VitalsObserver,
    started: bool,
}

impl<T: HttpTransport> Enhancer<T> {
    /// Build an engine from a config and a shared transport.
    pub fn new(config: EnhanceConfig, transport: Arc<T>) -> Self {
        let cart = CartClient::new(transport.clone(), config.base_url.clone());
        let suggest = SuggestClient::new(transport, config.base_url.clone());
        Self {
            lazy: LazyLoader::new(config.image_margin_px, config.iframe_margin_px),
            search: None,
            scroll: FrameThrottle::new(),
            resize: Debouncer::new(config.resize_debounce()),
            notifications: NotificationCenter::new(config.notification_ttl()),
            guard: SubmitGuard::new(),
            vitals: VitalsObserver::new(),
            started: false,
            cart,
            suggest,
            config,
        }
    }

    /// Initial scan: observe deferred elements (or resolve images eagerly
    /// when intersection support is off), bind the search input, and
    /// register guarded forms. Elements already in view resolve here.
    pub fn start(&mut self, page: &mut Page) {
        if self.config.intersection_supported {
            self.lazy.scan(page);
            self.lazy.check(page);
        } else {
            let resolved = LazyLoader::resolve_all_images(page);
            debug!(resolved, "intersection unsupported, resolved images eagerly");
        }

        self.search = page.first_with_attr(attrs::DATA_SEARCH_INPUT).map(|input| {
            SearchBox::new(
                input,
                self.config.search_min_chars,
                self.config.search_debounce(),
            )
        });
        self.guard.scan(page);
        self.started = true;
        info!(
            observed = self.lazy.observed_count(),
            guarded_forms = self.guard.guarded_count(),
            search_bound = self.search.is_some(),
            "enhancer started"
        );
    }

    /// Teardown: drop observers and timers and remove live notifications.
    /// Guarded submit controls are not restored.
    pub fn stop(&mut self, page: &mut Page) {
        self.lazy.clear();
        self.search = None;
        self.scroll = FrameThrottle::new();
        self.resize.cancel();
        self.notifications.clear(page);
        self.guard.clear();
        self.started = false;
        info!("enhancer stopped");
    }

    /// Whether `start` has run.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Route a page event.
    pub async fn handle_event(
        &mut self,
        page: &mut Page,
        event: PageEvent,
        now: Instant,
    ) -> EventOutcome {
        match event {
            PageEvent::Click { target } => self.handle_click(page, target, now).await,
            PageEvent::Input { target, value } => {
                if let Some(search) = self.search.as_mut() {
                    if search.input_node() == target {
                        search.on_input(&value, now);
                    }
                }
                EventOutcome::default()
            }
            PageEvent::Scroll { scroll_top } => {
                page.set_scroll_top(scroll_top);
                EventOutcome {
                    frame_requested: self.scroll.request(),
                    ..EventOutcome::default()
                }
            }
            PageEvent::Frame => {
                self.scroll.on_frame();
                self.lazy.check(page);
                EventOutcome::default()
            }
            PageEvent::Resize { viewport } => {
                page.set_viewport(viewport);
                self.resize.trigger(now);
                EventOutcome::default()
            }
            PageEvent::Submit { form } => {
                self.guard.on_submit(page, form);
                EventOutcome::default()
            }
        }
    }

    /// Fire due timers and sweep notifications. Call on the host's tick.
    pub async fn poll(&mut self, page: &mut Page, now: Instant) {
        let due_query = self.search.as_mut().and_then(|s| s.poll(now));
        if let Some(query) = due_query {
            self.run_suggest(page, &query).await;
        }
        if self.resize.fire(now) {
            debug!("viewport resized");
        }
        self.notifications.sweep(page, now);
    }

    /// Record a web-vitals timeline entry.
    pub fn record_vital(&mut self, entry: VitalsEntry) {
        self.vitals.record(entry);
    }

    /// The vitals collected so far.
    pub fn vitals(&self) -> &VitalsObserver {
        &self.vitals
    }

    async fn handle_click(&mut self, page: &mut Page, target: NodeId, now: Instant) -> EventOutcome {
        let ClickOutcome {
            actions,
            default_prevented,
        } = dispatch_click(page, target);
        for action in actions {
            match action {
                Action::QuickView(product_id) => self.open_quick_view(&product_id),
                Action::AddToCart { form } => {
                    if let Err(e) = self.add_to_cart(page, form, now).await {
                        error!(error = %e, "Error adding to cart");
                    }
                }
            }
        }
        EventOutcome {
            default_prevented,
            ..EventOutcome::default()
        }
    }

    /// Quick-view modal stub.
    fn open_quick_view(&self, product_id: &ProductId) {
        info!(product_id = %product_id, "Opening quick view for product");
    }

    /// Post the form, then refresh the cart count and notify on success.
    async fn add_to_cart(
        &mut self,
        page: &mut Page,
        form: NodeId,
        now: Instant,
    ) -> Result<(), EnhanceError> {
        let fields = page.form_fields(form)?;
        self.cart.add(&fields).await?;
        self.refresh_cart_count(page).await;
        self.notifications
            .notify(page, CART_ADDED_MESSAGE, Severity::Success, now);
        Ok(())
    }

    /// Write the current item count into every cart-count display.
    /// Failure is logged only; the displays keep their stale value.
    async fn refresh_cart_count(&mut self, page: &mut Page) {
        match self.cart.summary().await {
            Ok(summary) => {
                for id in page.elements_with_attr(attrs::DATA_CART_COUNT) {
                    page.set_text(id, summary.item_count.to_string());
                }
            }
            Err(e) => error!(error = %e, "Error updating cart count"),
        }
    }

    /// Render stub: suggestions are logged against the results container.
    async fn run_suggest(&mut self, page: &mut Page, query: &str) {
        match self.suggest.suggest(query).await {
            Ok(suggestions) => {
                let container = page.first_with_attr(attrs::DATA_SEARCH_RESULTS);
                debug!(
                    query,
                    container = container.map(|id| id.index()),
                    %suggestions,
                    "Search results"
                );
            }
            Err(e) => error!(error = %e, "Search error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use storefront_core::{Element, Rect, Viewport};
    use storefront_net::FetchError;

    /// Records calls and serves canned cart/suggest responses.
    #[derive(Debug, Default)]
    struct MockTransport {
        gets: Mutex<Vec<String>>,
        posts: Mutex<Vec<(String, String)>>,
        item_count: i64,
        fail_posts: bool,
    }

    impl MockTransport {
        fn with_item_count(item_count: i64) -> Self {
            Self {
                item_count,
                ..Self::default()
            }
        }

        fn failing_posts() -> Self {
            Self {
                fail_posts: true,
                ..Self::default()
            }
        }

        fn get_urls(&self) -> Vec<String> {
            self.gets.lock().unwrap().clone()
        }

        fn posted(&self) -> Vec<(String, String)> {
            self.posts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.gets.lock().unwrap().push(url.to_string());
            let body = if url.contains("/search/suggest.json") {
                serde_json::json!({ "results": ["blue shirt"] })
            } else {
                serde_json::json!({ "item_count": self.item_count })
            };
            Ok(body.to_string().into_bytes())
        }

        async fn post_form(&self, url: &str, body: String) -> Result<Vec<u8>, FetchError> {
            self.posts.lock().unwrap().push((url.to_string(), body));
            if self.fail_posts {
                return Err(FetchError::Connection("refused".to_string()));
            }
            Ok(b"{}".to_vec())
        }
    }

    fn engine(transport: Arc<MockTransport>) -> Enhancer<MockTransport> {
        Enhancer::new(EnhanceConfig::default(), transport)
    }

    fn cart_page(page: &mut Page) -> (NodeId, NodeId, NodeId) {
        let form = page.append(Element::new("form"));
        page.append_to(
            form,
            Element::new("input")
                .with_attr("name", "id")
                .with_attr("value", "12345"),
        );
        let button =
            page.append_to(form, Element::new("button").with_attr(attrs::DATA_ADD_TO_CART, ""));
        let counter = page.append(Element::new("span").with_attr(attrs::DATA_CART_COUNT, ""));
        (form, button, counter)
    }

    #[tokio::test]
    async fn test_add_to_cart_success_flow() {
        let transport = Arc::new(MockTransport::with_item_count(3));
        let mut enhancer = engine(transport.clone());
        let mut page = Page::new();
        let (_, button, counter) = cart_page(&mut page);
        enhancer.start(&mut page);

        let now = Instant::now();
        let outcome = enhancer
            .handle_event(&mut page, PageEvent::Click { target: button }, now)
            .await;

        assert!(outcome.default_prevented);
        // Exactly one post with the serialized form.
        let posts = transport.posted();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].0.ends_with("/cart/add.js"));
        assert_eq!(posts[0].1, "id=12345");
        // Exactly one cart-count refresh.
        let gets = transport.get_urls();
        assert_eq!(gets.iter().filter(|u| u.ends_with("/cart.js")).count(), 1);
        assert_eq!(page.text(counter), Some("3"));
        // Exactly one notification, which expires after the TTL.
        let live = page.elements_with_attr("class");
        let notes: Vec<_> = live
            .into_iter()
            .filter(|id| page.attr(*id, "class") == Some("notification notification--success"))
            .collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(page.text(notes[0]), Some(CART_ADDED_MESSAGE));

        enhancer.poll(&mut page, now + Duration::from_millis(3000)).await;
        assert!(!page.contains(notes[0]));
    }

    #[tokio::test]
    async fn test_add_to_cart_failure_is_logged_only() {
        let transport = Arc::new(MockTransport::failing_posts());
        let mut enhancer = engine(transport.clone());
        let mut page = Page::new();
        let (_, button, counter) = cart_page(&mut page);
        enhancer.start(&mut page);

        enhancer
            .handle_event(&mut page, PageEvent::Click { target: button }, Instant::now())
            .await;

        // No refresh, no notification, counter untouched.
        assert!(transport.get_urls().is_empty());
        assert_eq!(page.text(counter), Some(""));
        assert!(page
            .elements_with_attr("class")
            .iter()
            .all(|id| page.attr(*id, "class") != Some("notification notification--success")));
    }

    #[tokio::test]
    async fn test_search_debounce_collapses_to_final_query() {
        let transport = Arc::new(MockTransport::default());
        let mut enhancer = engine(transport.clone());
        let mut page = Page::new();
        let input = page.append(Element::new("input").with_attr(attrs::DATA_SEARCH_INPUT, ""));
        page.append(Element::new("div").with_attr(attrs::DATA_SEARCH_RESULTS, ""));
        enhancer.start(&mut page);

        let start = Instant::now();
        for (value, offset) in [("bl", 0), ("blu", 100), ("blue shirt", 200)] {
            enhancer
                .handle_event(
                    &mut page,
                    PageEvent::Input {
                        target: input,
                        value: value.to_string(),
                    },
                    start + Duration::from_millis(offset),
                )
                .await;
        }

        // Still quiet-period: nothing in flight.
        enhancer.poll(&mut page, start + Duration::from_millis(400)).await;
        assert!(transport.get_urls().is_empty());

        enhancer.poll(&mut page, start + Duration::from_millis(500)).await;
        let gets = transport.get_urls();
        assert_eq!(gets.len(), 1);
        assert!(gets[0].ends_with("/search/suggest.json?q=blue+shirt"));

        // No duplicate on later polls.
        enhancer.poll(&mut page, start + Duration::from_secs(2)).await;
        assert_eq!(transport.get_urls().len(), 1);
    }

    #[tokio::test]
    async fn test_short_query_never_fires() {
        let transport = Arc::new(MockTransport::default());
        let mut enhancer = engine(transport.clone());
        let mut page = Page::new();
        let input = page.append(Element::new("input").with_attr(attrs::DATA_SEARCH_INPUT, ""));
        enhancer.start(&mut page);

        let start = Instant::now();
        enhancer
            .handle_event(
                &mut page,
                PageEvent::Input {
                    target: input,
                    value: "a".to_string(),
                },
                start,
            )
            .await;
        enhancer.poll(&mut page, start + Duration::from_secs(5)).await;
        assert!(transport.get_urls().is_empty());
    }

    #[tokio::test]
    async fn test_scroll_events_coalesce_per_frame() {
        let transport = Arc::new(MockTransport::default());
        let mut enhancer = engine(transport);
        let mut page = Page::new();
        enhancer.start(&mut page);

        let now = Instant::now();
        let first = enhancer
            .handle_event(&mut page, PageEvent::Scroll { scroll_top: 10.0 }, now)
            .await;
        let second = enhancer
            .handle_event(&mut page, PageEvent::Scroll { scroll_top: 20.0 }, now)
            .await;
        assert!(first.frame_requested);
        assert!(!second.frame_requested);

        enhancer.handle_event(&mut page, PageEvent::Frame, now).await;
        let third = enhancer
            .handle_event(&mut page, PageEvent::Scroll { scroll_top: 30.0 }, now)
            .await;
        assert!(third.frame_requested);
    }

    #[tokio::test]
    async fn test_scroll_and_frame_drive_lazy_loading() {
        let transport = Arc::new(MockTransport::default());
        let mut enhancer = engine(transport);
        let mut page = Page::with_viewport(Viewport::new(1280.0, 800.0));
        let near = page.append(
            Element::new("img")
                .with_attr(attrs::DATA_SRC, "/near.jpg")
                .with_rect(Rect::new(0.0, 100.0, 100.0, 100.0)),
        );
        let far = page.append(
            Element::new("img")
                .with_attr(attrs::DATA_SRC, "/far.jpg")
                .with_rect(Rect::new(0.0, 3000.0, 100.0, 100.0)),
        );
        enhancer.start(&mut page);

        // In-view image resolves on start.
        assert_eq!(page.attr(near, "src"), Some("/near.jpg"));
        assert!(page.has_attr(far, attrs::DATA_SRC));

        let now = Instant::now();
        enhancer
            .handle_event(&mut page, PageEvent::Scroll { scroll_top: 2500.0 }, now)
            .await;
        enhancer.handle_event(&mut page, PageEvent::Frame, now).await;
        assert_eq!(page.attr(far, "src"), Some("/far.jpg"));
        assert!(!page.has_attr(far, attrs::DATA_SRC));
    }

    #[tokio::test]
    async fn test_eager_fallback_when_intersection_unsupported() {
        let transport = Arc::new(MockTransport::default());
        let config = EnhanceConfig {
            intersection_supported: false,
            ..EnhanceConfig::default()
        };
        let mut enhancer = Enhancer::new(config, transport);
        let mut page = Page::new();
        let img = page.append(
            Element::new("img")
                .with_attr(attrs::DATA_SRC, "/far.jpg")
                .with_rect(Rect::new(0.0, 9000.0, 100.0, 100.0)),
        );
        let iframe = page.append(
            Element::new("iframe")
                .with_attr(attrs::DATA_SRC, "/embed.html")
                .with_rect(Rect::new(0.0, 9000.0, 100.0, 100.0)),
        );
        enhancer.start(&mut page);

        assert_eq!(page.attr(img, "src"), Some("/far.jpg"));
        assert!(page.has_attr(iframe, attrs::DATA_SRC));
    }

    #[tokio::test]
    async fn test_submit_guard_via_engine() {
        let transport = Arc::new(MockTransport::default());
        let mut enhancer = engine(transport);
        let mut page = Page::new();
        let form = page.append(Element::new("form").with_attr(attrs::DATA_OPTIMIZED, ""));
        let button = page.append_to(
            form,
            Element::new("button")
                .with_attr("type", "submit")
                .with_text("Buy"),
        );
        enhancer.start(&mut page);

        enhancer
            .handle_event(&mut page, PageEvent::Submit { form }, Instant::now())
            .await;
        assert!(page.has_attr(button, "disabled"));
        assert_eq!(page.text(button), Some("Processing..."));
    }

    #[tokio::test]
    async fn test_stop_clears_observers_and_notifications() {
        let transport = Arc::new(MockTransport::with_item_count(1));
        let mut enhancer = engine(transport);
        let mut page = Page::new();
        let (_, button, _) = cart_page(&mut page);
        page.append(
            Element::new("img")
                .with_attr(attrs::DATA_SRC, "/far.jpg")
                .with_rect(Rect::new(0.0, 9000.0, 100.0, 100.0)),
        );
        enhancer.start(&mut page);
        assert!(enhancer.is_started());

        enhancer
            .handle_event(&mut page, PageEvent::Click { target: button }, Instant::now())
            .await;

        enhancer.stop(&mut page);
        assert!(!enhancer.is_started());
        // Notification elements are gone without waiting for the TTL.
        assert!(page
            .elements_with_attr("class")
            .iter()
            .all(|id| page.attr(*id, "class") != Some("notification notification--success")));
    }
}
