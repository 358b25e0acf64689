//! Author model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Author record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub full_name: String,
    /// Birth date (YYYY-MM-DD)
    pub birth_date: NaiveDate,
    pub email: Option<String>,
    pub phone_number: String,
}

/// Create / replace author request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    /// Identifier of the record being edited; ignored on create
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    pub full_name: String,
    pub birth_date: NaiveDate,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 32, message = "Phone number must be 1-32 characters"))]
    pub phone_number: String,
}
