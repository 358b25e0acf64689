//! List request parameters and dropdown options shared by all entity lists

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by every entity list
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Sort token, e.g. `name_asc` (defaults to `id_asc`)
    pub sort: Option<String>,
    /// Case-insensitive substring search
    pub search: Option<String>,
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Rows per page (default: all rows)
    pub per_page: Option<i64>,
}

/// Query parameters of the book list, which can also be scoped to a category
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookListParams {
    pub sort: Option<String>,
    pub search: Option<String>,
    /// `All` or a category id
    pub category: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl BookListParams {
    pub fn list_params(&self) -> ListParams {
        ListParams {
            sort: self.sort.clone(),
            search: self.search.clone(),
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// (value, label) pair used to populate a select input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectOption {
    /// Entity id, as a string
    pub value: String,
    /// Display label
    pub text: String,
}

impl SelectOption {
    pub fn new(id: i32, text: impl Into<String>) -> Self {
        Self {
            value: id.to_string(),
            text: text.into(),
        }
    }
}
