//! Book model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::category::Category;

/// Book record, optionally carrying its resolved category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub category_id: i32,
    /// Category, when eagerly resolved
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Create / replace book request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    /// Identifier of the record being edited; ignored on create
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(max = 550, message = "Description must be at most 550 characters"))]
    pub description: Option<String>,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub category_id: i32,
}
