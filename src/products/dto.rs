use askama::Template;

use crate::auth::session::SessionUser;
use crate::store::ProductRow;
use crate::views::format_price;

const UNCLASSIFIED: &str = "-";

/// Catalog row with every optional column already resolved for display.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub category: String,
    pub skin_type: String,
    pub concern: String,
}

impl From<ProductRow> for ProductView {
    fn from(p: ProductRow) -> Self {
        let or_dash = |v: Option<String>| v.unwrap_or_else(|| UNCLASSIFIED.into());
        Self {
            name: p.name,
            brand: or_dash(p.brand),
            price: format_price(p.price),
            category: or_dash(p.category_name),
            skin_type: or_dash(p.type_name),
            concern: or_dash(p.concern_name),
        }
    }
}

#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsPage {
    pub title: &'static str,
    pub current_user: Option<SessionUser>,
    pub products: Vec<ProductView>,
    pub error: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::product;

    #[test]
    fn missing_classification_renders_as_dash() {
        let view = ProductView::from(product(3, "Daily Mineral SPF 50", "Solis", 24.99, "Sunscreen", None, None));
        assert_eq!(view.price, "$24.99");
        assert_eq!(view.category, "Sunscreen");
        assert_eq!(view.skin_type, "-");
        assert_eq!(view.concern, "-");
    }
}
