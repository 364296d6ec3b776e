// SPDX-License-Identifier: Apache-2.0

use storefront_model::{Catalog, CategoryId};
use tracing::debug;

use crate::state::SessionState;
use crate::surface::{MemorySurface, PageSurface, Region};
use crate::view::{render_categories, render_grid, PreviewView};

/// One page session over a loaded catalog.
///
/// The three public operations are the outward surface a hosting page
/// wires its events to.
pub struct Storefront<'a, S: PageSurface> {
    catalog: &'a Catalog,
    surface: S,
    state: SessionState,
}

impl<'a, S: PageSurface> Storefront<'a, S> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, surface: S) -> Self {
        Self {
            catalog,
            surface,
            state: SessionState::default(),
        }
    }

    /// Renders the category bar and the unfiltered grid.
    pub fn init(&mut self) {
        self.state = SessionState::default();
        self.render_filtered();
        self.surface.replace(Region::PreviewOverlay, String::new());
        self.surface.set_visible(Region::PreviewOverlay, false);
    }

    pub fn select_category(&mut self, id: &CategoryId) {
        debug!(category = %id, "category selected");
        self.state.current_category = id.clone();
        self.render_filtered();
    }

    /// Shows the overlay for `product_id`; returns `false` for unknown ids.
    pub fn open_preview(&mut self, product_id: u32) -> bool {
        let Some(product) = self.catalog.product(product_id) else {
            debug!(product_id, "preview requested for unknown product");
            return false;
        };
        let view = PreviewView::for_product(self.catalog, product);
        self.surface.replace(Region::PreviewOverlay, view.render());
        self.surface.set_visible(Region::PreviewOverlay, true);
        self.state.open_preview = Some(product_id);
        true
    }

    pub fn close_preview(&mut self) {
        self.surface.set_visible(Region::PreviewOverlay, false);
        self.state.open_preview = None;
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn render_filtered(&mut self) {
        let bar = render_categories(self.catalog, &self.state.current_category);
        let grid = render_grid(self.catalog, &self.state.filter());
        self.surface.replace(Region::CategoryBar, bar);
        self.surface.replace(Region::ProductGrid, grid);
    }
}

/// Initial page state (all categories) as a static HTML fragment.
#[must_use]
pub fn render_initial_page(catalog: &Catalog) -> String {
    let mut storefront = Storefront::new(catalog, MemorySurface::default());
    storefront.init();
    storefront.into_surface().to_fragment()
}
