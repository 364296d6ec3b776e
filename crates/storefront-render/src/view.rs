// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;

use storefront_model::{Badge, Catalog, CategoryFilter, CategoryId, Product, DEFAULT_DELIVERY_TYPE};

use crate::escape::escape_html;

pub const OUT_OF_STOCK_LABEL: &str = "Tükendi";
pub const NO_RESULTS_TITLE: &str = "Ürün Bulunamadı";
pub const NO_RESULTS_MESSAGE: &str = "Bu kategoride henüz ürün bulunmuyor.";
pub const FALLBACK_ICON: &str = "✨";

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("sevgililer", "💕"),
    ("tema", "🎬"),
    ("eglence", "🎮"),
    ("ozelgun", "🎂"),
    ("romantik", "🌹"),
    ("surpriz", "🎁"),
    ("isletme", "☕"),
];

/// Glyph shown when a product image is missing or fails to load.
#[must_use]
pub fn category_icon(id: &CategoryId) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(key, _)| *key == id.as_str())
        .map_or(FALLBACK_ICON, |(_, icon)| *icon)
}

#[must_use]
pub const fn badge_class(badge: Badge) -> &'static str {
    match badge {
        Badge::New => "badge-new",
        Badge::Popular => "badge-popular",
        Badge::Premium => "badge-premium",
        Badge::Pro => "badge-pro",
        Badge::Magic => "badge-magic",
        Badge::BestValue => "badge-cheap",
    }
}

/// Shortest decimal form: `149`, `149.9`.
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("{price}")
}

#[must_use]
pub fn render_categories(catalog: &Catalog, active: &CategoryId) -> String {
    let mut out = String::new();
    for category in &catalog.categories {
        let class = if &category.id == active {
            "category-btn active"
        } else {
            "category-btn"
        };
        let _ = writeln!(
            out,
            "<button class=\"{class}\" data-category=\"{}\"><span>{}</span><span>{}</span></button>",
            escape_html(category.id.as_str()),
            escape_html(&category.icon),
            escape_html(&category.name),
        );
    }
    out
}

#[must_use]
pub fn render_no_results() -> String {
    format!(
        "<div class=\"no-results\">\n<div class=\"no-results-icon\">🔍</div>\n<h3>{NO_RESULTS_TITLE}</h3>\n<p>{NO_RESULTS_MESSAGE}</p>\n</div>\n"
    )
}

#[must_use]
pub fn render_grid(catalog: &Catalog, filter: &CategoryFilter) -> String {
    let cards: Vec<String> = catalog
        .filtered(filter)
        .map(|product| render_card(catalog, product))
        .collect();
    if cards.is_empty() {
        return render_no_results();
    }
    cards.concat()
}

fn render_badge(badge: Option<Badge>, base_class: &str) -> String {
    badge.map_or_else(String::new, |b| {
        format!(
            "<span class=\"{base_class} {}\">{}</span>",
            badge_class(b),
            escape_html(b.label())
        )
    })
}

fn render_image(product: &Product, icon: &str) -> String {
    if product.image.trim().is_empty() {
        return format!("<span class=\"product-icon-fallback\">{icon}</span>");
    }
    format!(
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" onerror=\"this.style.display='none'; this.nextElementSibling.style.display='flex';\">\n<span class=\"product-icon-fallback\" style=\"display:none;\">{icon}</span>",
        escape_html(&product.image),
        escape_html(&product.name),
    )
}

#[must_use]
pub fn render_card(catalog: &Catalog, product: &Product) -> String {
    let icon = category_icon(&product.category);
    let stock_overlay = if product.in_stock {
        String::new()
    } else {
        format!(
            "<div class=\"out-of-stock-overlay\"><span class=\"out-of-stock-text\">{OUT_OF_STOCK_LABEL}</span></div>"
        )
    };
    let buy = if product.in_stock {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"buy-btn\">🛒 Satın Al</a>",
            escape_html(&product.purchase_url)
        )
    } else {
        format!("<button class=\"buy-btn\" disabled>{OUT_OF_STOCK_LABEL}</button>")
    };

    format!(
        "<article class=\"product-card\" data-category=\"{category}\" data-product-id=\"{id}\">\n\
<div class=\"product-image\">\n{image}\n{badge}{stock_overlay}\n</div>\n\
<div class=\"product-content\">\n\
<div class=\"product-category\">{label}</div>\n\
<h3 class=\"product-title\">{name}</h3>\n\
<p class=\"product-description\">{description}</p>\n\
<div class=\"product-footer\">\n\
<div class=\"product-price\">{price} <span>TL</span></div>\n\
<div class=\"product-buttons\">\n\
<button class=\"preview-btn-outline\" data-preview=\"{id}\">👁️ İncele</button>\n\
{buy}\n\
</div>\n</div>\n</div>\n</article>\n",
        category = escape_html(product.category.as_str()),
        id = product.id,
        image = render_image(product, icon),
        badge = render_badge(product.badge, "product-badge"),
        label = escape_html(catalog.category_label(&product.category)),
        name = escape_html(&product.name),
        description = escape_html(&product.description),
        price = format_price(product.price),
    )
}

/// What the preview's purchase control does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuyAction {
    /// Opens the purchase page in a new browsing context.
    Link { href: String },
    Disabled,
}

/// Content of the detail overlay for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewView {
    pub product_id: u32,
    pub title: String,
    pub category_label: String,
    pub description: String,
    pub delivery: String,
    pub price: f64,
    pub badge: Option<Badge>,
    pub image: String,
    pub buy: BuyAction,
}

impl PreviewView {
    #[must_use]
    pub fn for_product(catalog: &Catalog, product: &Product) -> Self {
        let description = if product.full_description.trim().is_empty() {
            product.description.clone()
        } else {
            product.full_description.clone()
        };
        let delivery = if product.delivery_type.trim().is_empty() {
            DEFAULT_DELIVERY_TYPE.to_string()
        } else {
            product.delivery_type.clone()
        };
        let buy = if product.in_stock {
            BuyAction::Link {
                href: product.purchase_url.clone(),
            }
        } else {
            BuyAction::Disabled
        };
        Self {
            product_id: product.id,
            title: product.name.clone(),
            category_label: catalog.category_label(&product.category).to_string(),
            description,
            delivery,
            price: product.price,
            badge: product.badge,
            image: product.image.clone(),
            buy,
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let buy = match &self.buy {
            BuyAction::Link { href } => format!(
                "<a class=\"preview-btn preview-btn-primary\" id=\"previewBuyBtn\" href=\"{}\" target=\"_blank\" rel=\"noopener\">🛒 Satın Al</a>",
                escape_html(href)
            ),
            BuyAction::Disabled => format!(
                "<button class=\"preview-btn preview-btn-primary\" id=\"previewBuyBtn\" disabled>{OUT_OF_STOCK_LABEL}</button>"
            ),
        };
        format!(
            "<div class=\"preview-modal\" data-product-id=\"{id}\">\n\
<div class=\"preview-image-container\">\n\
<img id=\"previewImage\" src=\"{image}\" alt=\"{title}\">\n\
<button class=\"preview-close\" data-close-preview>&times;</button>\n{badge}\n</div>\n\
<div class=\"preview-content\">\n\
<div class=\"preview-category\">{label}</div>\n\
<h2 class=\"preview-title\">{title}</h2>\n\
<p class=\"preview-description\">{description}</p>\n\
<div class=\"preview-delivery\"><span class=\"preview-delivery-icon\">⚡</span><span class=\"preview-delivery-text\">{delivery}</span></div>\n\
</div>\n\
<div class=\"preview-footer\">\n\
<div class=\"preview-price\">{price} <span>TL</span></div>\n\
<div class=\"preview-actions\">{buy}</div>\n\
</div>\n</div>\n",
            id = self.product_id,
            image = escape_html(&self.image),
            title = escape_html(&self.title),
            badge = render_badge(self.badge, "preview-badge"),
            label = escape_html(&self.category_label),
            description = escape_html(&self.description),
            delivery = escape_html(&self.delivery),
            price = format_price(self.price),
        )
    }
}
