// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Storefront presentation layer.
//!
//! Renders a [`storefront_model::Catalog`] into a category bar, a filterable
//! product grid and a preview overlay. Page regions are injected through
//! [`PageSurface`], so rendering needs no live page.

mod escape;
mod state;
mod storefront;
mod surface;
mod view;

pub use escape::escape_html;
pub use state::SessionState;
pub use storefront::{render_initial_page, Storefront};
pub use surface::{MemorySurface, PageSurface, Region};
pub use view::{
    badge_class, category_icon, format_price, render_card, render_categories, render_grid,
    render_no_results, BuyAction, PreviewView, FALLBACK_ICON, NO_RESULTS_MESSAGE,
    NO_RESULTS_TITLE, OUT_OF_STOCK_LABEL,
};

pub const CRATE_NAME: &str = "storefront-render";
