use axum::{extract::State, response::Html};
use tracing::{error, instrument};

use super::dto::{ProductView, ProductsPage};
use crate::{auth::extractors::CurrentUser, error::AppError, state::AppState, views::render};

#[instrument(skip_all)]
pub async fn list_products(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let (products, error) = match state.store.products().await {
        Ok(rows) => (rows.into_iter().map(ProductView::from).collect(), None),
        Err(e) => {
            error!(error = %e, "fetching products failed");
            (Vec::new(), Some("Unable to load products."))
        }
    };
    render(&ProductsPage {
        title: "Products",
        current_user,
        products,
        error,
    })
}
