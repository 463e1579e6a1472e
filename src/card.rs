//! # Product Card
//!
//! One view model for every place a product is shown: listing tiles, the
//! full product page, and the admin editor. What differs between them is a
//! [`CardCapabilities`] value, not a separate component.

use crate::model::{DisplayPrice, MaterialSpec, PriceBreakdown, Product, ProductId, StoneRole};
use crate::pricing::{authoritative_price, PriceConfig};
use crate::session::Section;

/// Characters of description shown on a compact card.
pub const SUMMARY_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardCapabilities {
    /// Long description and material lines.
    pub full_page: bool,
    /// Edit buttons for each section.
    pub editable: bool,
    /// New / Bestseller / Featured badges.
    pub show_flags: bool,
}

impl CardCapabilities {
    pub fn listing() -> Self {
        Self {
            show_flags: true,
            ..Self::default()
        }
    }

    pub fn detail_page() -> Self {
        Self {
            full_page: true,
            show_flags: true,
            ..Self::default()
        }
    }

    pub fn admin() -> Self {
        Self {
            full_page: true,
            editable: true,
            show_flags: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: DisplayPrice,
    pub price_inr: String,
    pub price_usd: String,
    pub flags: Vec<&'static str>,
    pub materials: Vec<String>,
    pub edit_sections: Vec<Section>,
}

impl ProductCard {
    pub fn build(
        product: &Product,
        capabilities: CardCapabilities,
        recomputed: Option<&PriceBreakdown>,
        config: &PriceConfig,
    ) -> Self {
        let details = product.parsed_details();
        let short = product.description.clone().unwrap_or_default();
        let description = if capabilities.full_page {
            details.ai_description.clone().unwrap_or(short)
        } else {
            summarize(&short, SUMMARY_CHARS)
        };
        let price = authoritative_price(product, recomputed, config);

        Self {
            id: product.id,
            title: product.name.clone(),
            description,
            image_url: product.image_url.clone(),
            price,
            price_inr: format_inr(price.inr),
            price_usd: format_usd(price.usd),
            flags: if capabilities.show_flags {
                product.flags()
            } else {
                Vec::new()
            },
            materials: if capabilities.full_page {
                material_lines(&details.materials)
            } else {
                Vec::new()
            },
            edit_sections: if capabilities.editable {
                vec![Section::Basic, Section::Materials, Section::Image]
            } else {
                Vec::new()
            },
        }
    }
}

fn summarize(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let cut = match cut.rfind(' ') {
        Some(space) if space > 0 => &cut[..space],
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end())
}

/// Human-readable material lines; unused slots are omitted.
pub fn material_lines(spec: &MaterialSpec) -> Vec<String> {
    let mut lines = Vec::new();
    if spec.metal_weight > 0.0 {
        lines.push(format!("{} · {}g", spec.metal_type, trim_number(spec.metal_weight)));
    } else {
        lines.push(spec.metal_type.clone());
    }
    for (role, slot) in spec.slots() {
        if let Some(stone) = &slot.stone {
            let label = match role {
                StoneRole::Primary => "Primary",
                StoneRole::Secondary => "Secondary",
                StoneRole::Other => "Accent",
            };
            lines.push(format!("{label}: {stone} · {}ct", trim_number(slot.carats)));
        }
    }
    lines
}

fn trim_number(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Rupees with Indian digit grouping, no decimals: `₹1,25,000`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };
    format!("{sign}₹{grouped}")
}

/// Dollars with thousands separators and cents: `$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = format!("{:.2}", amount.abs());
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}${grouped}.{fraction}")
}
