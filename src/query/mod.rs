//! List-query engine.
//!
//! Every entity list goes through the same pipeline: resolve the relations the
//! query needs, keep the rows matching the search term, order them by the
//! field/direction selected by the sort token, then cut the requested page.
//! Everything here is a pure transformation over rows already loaded from the
//! store.
//!
//! Ordering is stable: rows comparing equal keep the order they were given in
//! (the repository hands them over in id order).

pub mod browse;
pub mod fields;
pub mod sort;

use std::ops::BitOr;

use indexmap::IndexMap;
use serde::Serialize;

pub use browse::{browse_books, CategorySelector};
pub use fields::{AuthorField, BookField, CategoryField, PublicationField};
pub use sort::{SortDirection, SortField, SortSpec};

use crate::models::ListParams;

/// Largest page size a caller may request
pub const MAX_PER_PAGE: i64 = 500;

/// Related entities that must be resolved before predicates run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relations {
    pub category: bool,
    pub book: bool,
    pub author: bool,
}

impl Relations {
    pub const NONE: Relations = Relations { category: false, book: false, author: false };
    pub const CATEGORY: Relations = Relations { category: true, book: false, author: false };
    pub const BOOK: Relations = Relations { category: false, book: true, author: false };
    pub const AUTHOR: Relations = Relations { category: false, book: false, author: true };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl BitOr for Relations {
    type Output = Relations;

    fn bitor(self, rhs: Relations) -> Relations {
        Relations {
            category: self.category || rhs.category,
            book: self.book || rhs.book,
            author: self.author || rhs.author,
        }
    }
}

/// An entity that can be listed through the engine
pub trait Listable: Sized {
    type Field: SortField<Row = Self>;

    /// Relations always resolved so dependent fields can be displayed
    const DISPLAY_RELATIONS: Relations;

    /// Relations dereferenced by the search predicate
    const SEARCH_RELATIONS: Relations;

    /// Text fields inspected by the search predicate. Unresolved relations
    /// contribute `None`.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Whether any search field contains `needle`, which must already be
    /// lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Page bounds applied after filtering and ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.map(|n| n.clamp(1, MAX_PER_PAGE)),
        }
    }

    fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        match self.per_page {
            None => rows,
            Some(per_page) => {
                let offset = (self.page - 1).saturating_mul(per_page);
                let offset = usize::try_from(offset).unwrap_or(usize::MAX);
                rows.into_iter().skip(offset).take(per_page as usize).collect()
            }
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of an ordered, filtered list
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of rows matching the filter, before pagination
    pub total: usize,
    pub page: i64,
    pub per_page: Option<i64>,
    /// Effective sort token
    pub sort: String,
    /// Token each column header should link to (toggles the direction of the
    /// active column)
    pub sort_links: IndexMap<String, String>,
}

/// Query descriptor: search term, ordering and page of one entity list
#[derive(Debug, Clone)]
pub struct ListQuery<F: SortField> {
    search: Option<String>,
    sort: SortSpec<F>,
    pagination: Pagination,
}

impl<F: SortField> ListQuery<F> {
    pub fn new(search: Option<&str>, sort: Option<&str>, pagination: Pagination) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()).map(str::to_lowercase),
            sort: SortSpec::parse(sort),
            pagination,
        }
    }

    pub fn from_params(params: &ListParams) -> Self {
        Self::new(
            params.search.as_deref(),
            params.sort.as_deref(),
            Pagination::new(params.page, params.per_page),
        )
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> SortSpec<F> {
        self.sort
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Keep only rows matching the search term (all rows when there is none)
    pub fn filter<R>(&self, rows: Vec<R>) -> Vec<R>
    where
        R: Listable<Field = F>,
        F: SortField<Row = R>,
    {
        match self.search.as_deref() {
            None => rows,
            Some(needle) => rows.into_iter().filter(|row| row.matches(needle)).collect(),
        }
    }

    /// Stable ordering by the selected field and direction
    pub fn order<R>(&self, rows: &mut [R])
    where
        F: SortField<Row = R>,
    {
        rows.sort_by(|a, b| self.sort.compare(a, b));
    }

    /// Order, count and paginate rows that have already been filtered
    pub fn paginate<R>(&self, mut rows: Vec<R>) -> Page<R>
    where
        F: SortField<Row = R>,
    {
        self.order(&mut rows);
        let total = rows.len();
        Page {
            items: self.pagination.slice(rows),
            total,
            page: self.pagination.page,
            per_page: self.pagination.per_page,
            sort: self.sort.token(),
            sort_links: self.sort.column_links(),
        }
    }

    /// Filter, order and paginate
    pub fn apply<R>(&self, rows: Vec<R>) -> Page<R>
    where
        R: Listable<Field = F>,
        F: SortField<Row = R>,
    {
        let rows = self.filter(rows);
        self.paginate(rows)
    }
}

impl<F> ListQuery<F>
where
    F: SortField,
    F::Row: Listable<Field = F>,
{
    /// Relations the store must resolve before this query can run
    pub fn relations(&self) -> Relations {
        let mut relations = <F::Row as Listable>::DISPLAY_RELATIONS | self.sort.field.relations();
        if self.search.is_some() {
            relations = relations | <F::Row as Listable>::SEARCH_RELATIONS;
        }
        relations
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::models::{Author, Book, Publication};

    fn authors() -> Vec<Author> {
        vec![
            author(1, "Zora Neale", Some("zora@example.com"), (1891, 1, 7)),
            author(2, "Anna Akhmatova", None, (1889, 6, 23)),
            author(3, "Frank Herbert", Some("frank@dune.org"), (1920, 10, 8)),
            author(4, "Anna Akhmatova", Some("anna@example.com"), (1889, 6, 23)),
        ]
    }

    fn ids<T, K: Fn(&T) -> i32>(rows: &[T], key: K) -> Vec<i32> {
        rows.iter().map(key).collect()
    }

    #[test]
    fn test_default_sort_is_id_ascending() {
        let mut rows = authors();
        rows.reverse();
        let page = ListQuery::<AuthorField>::new(None, None, Pagination::default()).apply(rows);
        assert_eq!(ids(&page.items, |a| a.id), vec![1, 2, 3, 4]);
        assert_eq!(page.sort, "id_asc");
    }

    #[test]
    fn test_unknown_token_falls_back_to_id_ascending() {
        let mut rows = authors();
        rows.reverse();
        let page = ListQuery::<AuthorField>::new(None, Some("shoe_size_desc"), Pagination::default())
            .apply(rows);
        assert_eq!(ids(&page.items, |a| a.id), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_name_sort_keeps_ties_in_input_order() {
        let asc = ListQuery::<AuthorField>::new(None, Some("name_asc"), Pagination::default())
            .apply(authors());
        assert_eq!(ids(&asc.items, |a| a.id), vec![2, 4, 3, 1]);

        let desc = ListQuery::<AuthorField>::new(None, Some("name_desc"), Pagination::default())
            .apply(authors());
        assert_eq!(ids(&desc.items, |a| a.id), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_name_sort_is_case_sensitive() {
        let rows = vec![
            author(1, "bob", None, (1950, 1, 1)),
            author(2, "Bob", None, (1950, 1, 1)),
            author(3, "alice", None, (1950, 1, 1)),
        ];
        let page = ListQuery::<AuthorField>::new(None, Some("name_asc"), Pagination::default())
            .apply(rows);
        // Uppercase sorts before lowercase on the stored value
        assert_eq!(ids(&page.items, |a| a.id), vec![2, 3, 1]);
    }

    #[test]
    fn test_missing_email_sorts_first_ascending() {
        let page = ListQuery::<AuthorField>::new(None, Some("email_asc"), Pagination::default())
            .apply(authors());
        assert_eq!(ids(&page.items, |a| a.id), vec![2, 4, 3, 1]);

        let page = ListQuery::<AuthorField>::new(None, Some("email_desc"), Pagination::default())
            .apply(authors());
        assert_eq!(ids(&page.items, |a| a.id), vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_birth_date_sort() {
        let page = ListQuery::<AuthorField>::new(None, Some("birthDate_desc"), Pagination::default())
            .apply(authors());
        assert_eq!(ids(&page.items, |a| a.id), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_author_search_matches_name_or_email_case_insensitively() {
        let page = ListQuery::<AuthorField>::new(Some("ANNA"), None, Pagination::default())
            .apply(authors());
        assert_eq!(ids(&page.items, |a| a.id), vec![2, 4]);

        let page = ListQuery::<AuthorField>::new(Some("dune.ORG"), None, Pagination::default())
            .apply(authors());
        assert_eq!(ids(&page.items, |a| a.id), vec![3]);
    }

    #[test]
    fn test_every_result_matches_and_no_match_is_dropped() {
        let needle = "an";
        let all = authors();
        let page = ListQuery::<AuthorField>::new(Some(needle), None, Pagination::default())
            .apply(all.clone());
        for row in &all {
            let kept = page.items.iter().any(|a| a.id == row.id);
            let matches = row.full_name.to_lowercase().contains(needle)
                || row
                    .email
                    .as_deref()
                    .map(|e| e.to_lowercase().contains(needle))
                    .unwrap_or(false);
            assert_eq!(kept, matches, "author {}", row.id);
        }
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let page = ListQuery::<AuthorField>::new(Some(""), None, Pagination::default())
            .apply(authors());
        assert_eq!(page.total, 4);
    }

    fn books() -> Vec<Book> {
        let fiction = category(1, "Fiction");
        let history = category(2, "History");
        vec![
            book(1, "Rome", 2500, &history),
            book(2, "Dune", 1999, &fiction),
            book(3, "Anathem", 2500, &fiction),
        ]
    }

    #[test]
    fn test_book_sorts() {
        let by_price = ListQuery::<BookField>::new(None, Some("price_desc"), Pagination::default())
            .apply(books());
        assert_eq!(ids(&by_price.items, |b| b.id), vec![1, 3, 2]);

        let by_category = ListQuery::<BookField>::new(None, Some("category_asc"), Pagination::default())
            .apply(books());
        assert_eq!(ids(&by_category.items, |b| b.id), vec![2, 3, 1]);
    }

    fn publications() -> Vec<Publication> {
        let books = books();
        let authors = authors();
        vec![
            publication(1, &books[0], &authors[0], (2001, 5, 1)),
            publication(2, &books[1], &authors[2], (1965, 8, 1)),
            publication(3, &books[2], &authors[1], (2008, 9, 9)),
        ]
    }

    #[test]
    fn test_publication_search_dereferences_book_and_author() {
        let by_book = ListQuery::<PublicationField>::new(Some("dune"), None, Pagination::default())
            .apply(publications());
        assert_eq!(ids(&by_book.items, |p| p.id), vec![2]);

        let by_author = ListQuery::<PublicationField>::new(Some("akhmat"), None, Pagination::default())
            .apply(publications());
        assert_eq!(ids(&by_author.items, |p| p.id), vec![3]);
    }

    #[test]
    fn test_publication_sorts_on_related_fields() {
        let page = ListQuery::<PublicationField>::new(None, Some("authorName_asc"), Pagination::default())
            .apply(publications());
        assert_eq!(ids(&page.items, |p| p.id), vec![3, 2, 1]);

        let page = ListQuery::<PublicationField>::new(None, Some("bookName_desc"), Pagination::default())
            .apply(publications());
        assert_eq!(ids(&page.items, |p| p.id), vec![1, 2, 3]);

        let page = ListQuery::<PublicationField>::new(None, Some("date_asc"), Pagination::default())
            .apply(publications());
        assert_eq!(ids(&page.items, |p| p.id), vec![2, 1, 3]);
    }

    #[test]
    fn test_pagination_reports_filtered_total() {
        let query = ListQuery::<AuthorField>::new(None, Some("id_desc"), Pagination::new(Some(2), Some(3)));
        let page = query.apply(authors());
        assert_eq!(page.total, 4);
        assert_eq!(ids(&page.items, |a| a.id), vec![1]);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, Some(3));
    }

    #[test]
    fn test_pagination_bounds_are_clamped() {
        let p = Pagination::new(Some(0), Some(100_000));
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, Some(MAX_PER_PAGE));
    }

    #[test]
    fn test_pagination_huge_page_is_empty() {
        let rows: Vec<i32> = (1..=10).collect();
        let p = Pagination::new(Some(i64::MAX), Some(MAX_PER_PAGE));
        assert!(p.slice(rows.clone()).is_empty());

        let last = Pagination::new(Some(2), Some(5));
        assert_eq!(last.slice(rows), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_relations_follow_sort_and_search() {
        let plain = ListQuery::<AuthorField>::new(None, None, Pagination::default());
        assert!(plain.relations().is_empty());

        let books = ListQuery::<BookField>::new(None, Some("name_asc"), Pagination::default());
        assert_eq!(books.relations(), Relations::CATEGORY);

        let pubs = ListQuery::<PublicationField>::new(Some("x"), None, Pagination::default());
        assert_eq!(pubs.relations(), Relations::BOOK | Relations::AUTHOR);
    }
}
