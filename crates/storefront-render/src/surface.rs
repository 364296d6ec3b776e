// SPDX-License-Identifier: Apache-2.0

//! Page regions the storefront renders into.
//!
//! A hosting page implements [`PageSurface`] over its real containers;
//! [`MemorySurface`] keeps the markup in memory for tests and static output.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    CategoryBar,
    ProductGrid,
    PreviewOverlay,
}

pub trait PageSurface {
    /// Replaces the whole content of `region`.
    fn replace(&mut self, region: Region, html: String);

    fn set_visible(&mut self, region: Region, visible: bool);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    pub category_bar: String,
    pub product_grid: String,
    pub preview_overlay: String,
    pub overlay_visible: bool,
    pub renders: usize,
}

impl MemorySurface {
    #[must_use]
    pub fn region(&self, region: Region) -> &str {
        match region {
            Region::CategoryBar => &self.category_bar,
            Region::ProductGrid => &self.product_grid,
            Region::PreviewOverlay => &self.preview_overlay,
        }
    }

    /// Category bar followed by the product grid, as one HTML fragment.
    #[must_use]
    pub fn to_fragment(&self) -> String {
        format!(
            "<nav class=\"categories\" id=\"categoriesContainer\">\n{}</nav>\n<section class=\"products-grid\" id=\"productsGrid\">\n{}</section>\n",
            self.category_bar, self.product_grid
        )
    }
}

impl PageSurface for MemorySurface {
    fn replace(&mut self, region: Region, html: String) {
        self.renders += 1;
        match region {
            Region::CategoryBar => self.category_bar = html,
            Region::ProductGrid => self.product_grid = html,
            Region::PreviewOverlay => self.preview_overlay = html,
        }
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        if region == Region::PreviewOverlay {
            self.overlay_visible = visible;
        }
    }
}
