//! Category-scoped book browse

use std::str::FromStr;

use super::{BookField, Listable, ListQuery, Page};
use crate::{
    error::{AppError, AppResult},
    models::Book,
};

/// Category filter of the book browse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelector {
    /// The `All` sentinel: no category filter
    All,
    Category(i32),
}

impl CategorySelector {
    pub const ALL_SENTINEL: &'static str = "All";

    /// A missing or empty selector means `All`
    pub fn parse(selector: Option<&str>) -> AppResult<Self> {
        selector.map_or(Ok(CategorySelector::All), str::parse)
    }

    pub fn contains(&self, book: &Book) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Category(id) => book.category_id == *id,
        }
    }
}

impl FromStr for CategorySelector {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_SENTINEL || s.trim().is_empty() {
            return Ok(CategorySelector::All);
        }
        s.trim()
            .parse::<i32>()
            .map(CategorySelector::Category)
            .map_err(|_| AppError::BadRequest(format!("Invalid category selector '{}'", s)))
    }
}

/// Filter books by search term and category, then order and paginate.
///
/// When a search term is given and nothing matches, the whole unfiltered
/// collection is returned instead of an empty page.
pub fn browse_books(
    rows: Vec<Book>,
    selector: CategorySelector,
    query: &ListQuery<BookField>,
) -> Page<Book> {
    let keep: Vec<bool> = rows
        .iter()
        .map(|book| {
            selector.contains(book) && query.search().map_or(true, |needle| book.matches(needle))
        })
        .collect();

    if query.search().is_some() && !keep.contains(&true) {
        tracing::debug!(
            "Book browse matched nothing (search={:?}, category={:?}); returning all {} books",
            query.search(),
            selector,
            rows.len()
        );
        return query.paginate(rows);
    }

    let rows = rows
        .into_iter()
        .zip(keep)
        .filter_map(|(book, kept)| kept.then_some(book))
        .collect();
    query.paginate(rows)
}
