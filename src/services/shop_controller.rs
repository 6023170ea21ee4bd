use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::{
    chart::{ChartSink, TrendingChartAdapter},
    models::{
        cart::OrderSummary,
        catalog::{CatalogError, ShopSeed},
        event::UiEvent,
    },
    services::{CartModel, CatalogStore, TrendingCounter},
    utils::{formatting::CurrencyFormat, validation::is_valid_price},
    views::{cart_view, recommendation_view, CartRender, RecommendationRender},
};

/// Which views an event re-rendered.
///
/// `order` is set when an order was placed; read it from `last_order`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    pub recommendations: bool,
    pub cart: bool,
    pub chart: bool,
    pub order: bool,
}

/// Owns the widget state and keeps every view in step with it.
///
/// Each operation mutates, then re-renders the affected views before
/// returning, so a caller never observes a stale view.
pub struct ShopController<S: ChartSink> {
    catalog: CatalogStore,
    cart: CartModel,
    trending: Rc<RefCell<TrendingCounter>>,
    chart: TrendingChartAdapter<S>,
    currency: CurrencyFormat,
    recommendations: Option<RecommendationRender>,
    cart_view: CartRender,
    last_order: Option<OrderSummary>,
}

impl<S: ChartSink> ShopController<S> {
    pub fn new(seed: ShopSeed, sink: S, currency: CurrencyFormat) -> Result<Self, CatalogError> {
        let catalog = CatalogStore::new(seed.catalog)?;
        let trending = Rc::new(RefCell::new(TrendingCounter::seeded(&seed.trending)?));
        let chart = TrendingChartAdapter::new(sink, Rc::clone(&trending));
        let cart = CartModel::new();
        let cart_view = cart_view::render(&cart, &currency);

        info!(
            "Shop ready: {} products, {} trending labels",
            catalog.len(),
            trending.borrow().len()
        );

        Ok(Self {
            catalog,
            cart,
            trending,
            chart,
            currency,
            recommendations: None,
            cart_view,
            last_order: None,
        })
    }

    /// Selection change: render recommendations for `product`.
    pub fn select_product(&mut self, product: &str) -> &RecommendationRender {
        info!("Product selected: '{}'", product);
        let render = recommendation_view::render(&self.catalog, product, &self.currency);
        if render.is_placeholder() {
            debug!("No recommendations for '{}'", product);
        }
        self.recommendations.insert(render)
    }

    /// Add one unit to the cart and count it as trending. Refreshes cart and chart.
    pub fn add_item(&mut self, name: &str, price: f64) -> Refresh {
        let price = if is_valid_price(price) {
            price
        } else {
            warn!("Invalid price {} for '{}', using 0", price, name);
            0.0
        };

        self.cart.add_item(name, price);
        self.trending.borrow_mut().increment(name);

        self.refresh_cart();
        self.chart.refresh();
        Refresh {
            cart: true,
            chart: true,
            ..Default::default()
        }
    }

    /// Remove an entry. Trending counts are left as they are.
    pub fn remove_item(&mut self, name: &str) -> Refresh {
        self.cart.remove_item(name);
        self.refresh_cart();
        Refresh {
            cart: true,
            ..Default::default()
        }
    }

    pub fn update_quantity(&mut self, name: &str, raw: &str) -> Refresh {
        self.cart.update_quantity(name, raw);
        self.refresh_cart();
        Refresh {
            cart: true,
            ..Default::default()
        }
    }

    /// Place the order: summarize the cart, then clear it.
    ///
    /// Returns `None` for an empty cart. Trending counts are untouched.
    pub fn submit_order(&mut self) -> Option<OrderSummary> {
        if self.cart.is_empty() {
            debug!("Order submit ignored, cart is empty");
            self.refresh_cart();
            return None;
        }

        let order = OrderSummary {
            item_count: self.cart.item_count(),
            total: self.cart.total(),
        };
        self.cart.clear();
        self.refresh_cart();

        info!(
            "Order placed: {} items, total {}",
            order.item_count,
            self.currency.format(order.total)
        );
        self.last_order = Some(order);
        Some(order)
    }

    /// Route a UI event to its handler.
    pub fn dispatch(&mut self, event: UiEvent) -> Refresh {
        debug!("Dispatching {}", event);
        match event {
            UiEvent::SelectProduct { product } => {
                self.select_product(&product);
                Refresh {
                    recommendations: true,
                    ..Default::default()
                }
            }
            UiEvent::AddItem { name, price } => self.add_item(&name, price),
            UiEvent::RemoveItem { name } => self.remove_item(&name),
            UiEvent::UpdateQuantity { name, raw } => self.update_quantity(&name, &raw),
            UiEvent::SubmitOrder => Refresh {
                cart: true,
                order: self.submit_order().is_some(),
                ..Default::default()
            },
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &CartModel {
        &self.cart
    }

    pub fn cart_view(&self) -> &CartRender {
        &self.cart_view
    }

    /// Last rendered recommendations; `None` before any selection.
    pub fn recommendations(&self) -> Option<&RecommendationRender> {
        self.recommendations.as_ref()
    }

    /// Most recent order placed, if any.
    pub fn last_order(&self) -> Option<&OrderSummary> {
        self.last_order.as_ref()
    }

    pub fn trending_count(&self, label: &str) -> u64 {
        self.trending.borrow().count(label)
    }

    pub fn trending_top(&self, n: usize) -> Vec<(String, u64)> {
        self.trending.borrow().top(n)
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn chart(&self) -> &S {
        self.chart.sink()
    }

    fn refresh_cart(&mut self) {
        self.cart_view = cart_view::render(&self.cart, &self.currency);
    }
}
