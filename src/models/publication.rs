//! Publication model (a book published by an author at a given date)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{author::Author, book::Book};

/// Publication record, optionally carrying its resolved book and author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Publication {
    pub id: i32,
    pub book_id: i32,
    pub author_id: i32,
    pub published_date: NaiveDate,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<Book>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

/// Create / replace publication request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PublicationForm {
    /// Identifier of the record being edited; ignored on create
    #[serde(default)]
    pub id: Option<i32>,
    pub book_id: i32,
    pub author_id: i32,
    pub published_date: NaiveDate,
}
