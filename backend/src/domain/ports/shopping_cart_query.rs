//! Driving port for reading aggregated shopping-list totals.

use async_trait::async_trait;

use crate::domain::{Error, IngredientTotal, UserId};

/// Domain use-case port for shopping-list totals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingCartQuery: Send + Sync {
    /// Totals per ingredient across the user's list, in export order.
    async fn totals(&self, user: &UserId) -> Result<Vec<IngredientTotal>, Error>;

    /// Totals rendered as a CSV document.
    async fn export_csv(&self, user: &UserId) -> Result<String, Error>;
}
