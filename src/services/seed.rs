//! Demo-data seeding.
//!
//! Runs once at startup. Each table is seeded only when it is empty, so
//! restarting the server never duplicates rows.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::{
    config::SeedConfig,
    error::AppResult,
    models::{AuthorForm, BookForm, CategoryForm, PublicationForm},
    query::Relations,
    repository::CatalogRepository,
};

const CATEGORY_NAMES: &[&str] = &[
    "Fiction", "History", "Science", "Poetry", "Biography", "Philosophy", "Travel", "Art",
    "Children", "Technology", "Religion", "Economics", "Drama", "Mystery", "Fantasy",
];

const FIRST_NAMES: &[&str] = &[
    "Aziza", "Bobur", "Clara", "Dilnoza", "Elias", "Farrukh", "Grace", "Hugo", "Iris", "Jasur",
    "Kamila", "Leo", "Madina", "Nodir", "Olga", "Pavel", "Rustam", "Sevara", "Timur", "Vera",
];

const LAST_NAMES: &[&str] = &[
    "Abdullaeva", "Brooks", "Karimov", "Dubois", "Ergasheva", "Fischer", "Gulyamov", "Hansen",
    "Ivanova", "Jensen", "Kowalski", "Lindqvist", "Mirzaev", "Novak", "Olsen", "Petrova",
];

const WORDS: &[&str] = &[
    "amber", "atlas", "beacon", "cinder", "delta", "ember", "fable", "garden", "harbor", "island",
    "journey", "kingdom", "lantern", "meadow", "nomad", "orbit", "prairie", "quartz", "river",
    "summit", "tide", "umbra", "valley", "willow", "zenith",
];

/// Rows inserted per table by one seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub authors: usize,
    pub books: usize,
    pub publications: usize,
}

pub struct Seeder {
    repository: Arc<dyn CatalogRepository>,
    config: SeedConfig,
    rng: StdRng,
}

impl Seeder {
    pub fn new(repository: Arc<dyn CatalogRepository>, config: SeedConfig) -> Self {
        Self {
            repository,
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed random seed (reproducible data)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Seed every empty table, in dependency order
    pub async fn run(&mut self) -> AppResult<SeedReport> {
        let report = SeedReport {
            categories: self.seed_categories().await?,
            authors: self.seed_authors().await?,
            books: self.seed_books().await?,
            publications: self.seed_publications().await?,
        };
        tracing::info!(
            "Seeding done: {} categories, {} authors, {} books, {} publications inserted",
            report.categories,
            report.authors,
            report.books,
            report.publications
        );
        Ok(report)
    }

    async fn seed_categories(&mut self) -> AppResult<usize> {
        if self.repository.category_count().await? > 0 {
            return Ok(0);
        }

        let mut names: Vec<String> = CATEGORY_NAMES.iter().map(|s| s.to_string()).collect();
        names.shuffle(&mut self.rng);
        // More categories than known names: number the extra ones
        let mut round = 2;
        while names.len() < self.config.categories {
            names.extend(CATEGORY_NAMES.iter().map(|s| format!("{} {}", s, round)));
            round += 1;
        }
        names.truncate(self.config.categories);

        for name in &names {
            self.repository
                .category_create(&CategoryForm { id: None, name: name.clone() })
                .await?;
        }
        Ok(names.len())
    }

    async fn seed_authors(&mut self) -> AppResult<usize> {
        if self.repository.author_count().await? > 0 {
            return Ok(0);
        }

        for _ in 0..self.config.authors {
            let form = self.random_author();
            self.repository.author_create(&form).await?;
        }
        Ok(self.config.authors)
    }

    async fn seed_books(&mut self) -> AppResult<usize> {
        if self.repository.book_count().await? > 0 {
            return Ok(0);
        }

        let categories = self.repository.category_list().await?;
        let mut inserted = 0;
        for category in &categories {
            for _ in 0..self.config.books_per_category {
                let form = self.random_book(category.id);
                self.repository.book_create(&form).await?;
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// One publication per book, by a random author
    async fn seed_publications(&mut self) -> AppResult<usize> {
        if self.repository.publication_count().await? > 0 {
            return Ok(0);
        }

        let authors = self.repository.author_list().await?;
        if authors.is_empty() {
            return Ok(0);
        }
        let books = self.repository.book_list(Relations::NONE).await?;

        let today = Utc::now().date_naive();
        let mut inserted = 0;
        for book in &books {
            let author_id = authors
                .choose(&mut self.rng)
                .map(|a| a.id)
                .unwrap_or(authors[0].id);
            let days_ago = self.rng.gen_range(0..=18 * 365);
            let form = PublicationForm {
                id: None,
                book_id: book.id,
                author_id,
                published_date: today - Duration::days(days_ago),
            };
            self.repository.publication_create(&form).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    fn random_author(&mut self) -> AuthorForm {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Anna");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Smith");
        let earliest = NaiveDate::from_ymd_opt(1920, 1, 1).unwrap_or(NaiveDate::MIN);
        let birth_date = earliest + Duration::days(self.rng.gen_range(0..80 * 365));
        let phone_number = format!(
            "+998-{:02}-{:03}-{:02}-{:02}",
            self.rng.gen_range(0..100),
            self.rng.gen_range(0..1000),
            self.rng.gen_range(0..100),
            self.rng.gen_range(0..100)
        );

        AuthorForm {
            id: None,
            full_name: format!("{} {}", first, last),
            birth_date,
            email: Some(format!(
                "{}.{}@example.com",
                first.to_lowercase(),
                last.to_lowercase()
            )),
            phone_number,
        }
    }

    fn random_book(&mut self, category_id: i32) -> BookForm {
        let name = WORDS.choose(&mut self.rng).copied().unwrap_or("untitled");
        let description = (0..3)
            .map(|_| {
                let words: Vec<&str> = WORDS
                    .choose_multiple(&mut self.rng, 6)
                    .copied()
                    .collect();
                format!("{}.", words.join(" "))
            })
            .collect::<Vec<_>>()
            .join(" ");

        BookForm {
            id: None,
            name: name.to_string(),
            description: Some(description),
            price: Decimal::new(self.rng.gen_range(3_000_000..=30_000_000), 2),
            category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::{Author, Book, Category, Publication};
    use crate::repository::MockCatalogRepository;

    fn config() -> SeedConfig {
        SeedConfig {
            enabled: true,
            categories: 3,
            authors: 4,
            books_per_category: 2,
        }
    }

    #[tokio::test]
    async fn test_populated_tables_are_left_alone() {
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_count().returning(|| Ok(10));
        mock.expect_author_count().returning(|| Ok(100));
        mock.expect_book_count().returning(|| Ok(510));
        mock.expect_publication_count().returning(|| Ok(510));
        mock.expect_category_create().never();
        mock.expect_author_create().never();
        mock.expect_book_create().never();
        mock.expect_publication_create().never();

        let report = Seeder::new(Arc::new(mock), config()).run().await.unwrap();
        assert_eq!(report, SeedReport::default());
    }

    #[derive(Default)]
    struct Tables {
        categories: Mutex<Vec<Category>>,
        authors: Mutex<Vec<Author>>,
        books: Mutex<Vec<Book>>,
        publications: Mutex<Vec<Publication>>,
    }

    #[tokio::test]
    async fn test_empty_tables_are_seeded() {
        let tables = Arc::new(Tables::default());
        let mut mock = MockCatalogRepository::new();
        mock.expect_category_count().returning(|| Ok(0));
        mock.expect_author_count().returning(|| Ok(0));
        mock.expect_book_count().returning(|| Ok(0));
        mock.expect_publication_count().returning(|| Ok(0));

        let t = tables.clone();
        mock.expect_category_create().returning(move |f| {
            let mut rows = t.categories.lock().unwrap();
            let row = Category { id: rows.len() as i32 + 1, name: f.name.clone() };
            rows.push(row.clone());
            Ok(row)
        });
        let t = tables.clone();
        mock.expect_category_list()
            .returning(move || Ok(t.categories.lock().unwrap().clone()));

        let t = tables.clone();
        mock.expect_author_create().returning(move |f| {
            let mut rows = t.authors.lock().unwrap();
            let row = Author {
                id: rows.len() as i32 + 1,
                full_name: f.full_name.clone(),
                birth_date: f.birth_date,
                email: f.email.clone(),
                phone_number: f.phone_number.clone(),
            };
            rows.push(row.clone());
            Ok(row)
        });
        let t = tables.clone();
        mock.expect_author_list()
            .returning(move || Ok(t.authors.lock().unwrap().clone()));

        let t = tables.clone();
        mock.expect_book_create().returning(move |f| {
            let mut rows = t.books.lock().unwrap();
            let row = Book {
                id: rows.len() as i32 + 1,
                name: f.name.clone(),
                description: f.description.clone(),
                price: f.price,
                category_id: f.category_id,
                category: None,
            };
            rows.push(row.clone());
            Ok(row)
        });
        let t = tables.clone();
        mock.expect_book_list()
            .returning(move |_| Ok(t.books.lock().unwrap().clone()));

        let t = tables.clone();
        mock.expect_publication_create().returning(move |f| {
            let mut rows = t.publications.lock().unwrap();
            let row = Publication {
                id: rows.len() as i32 + 1,
                book_id: f.book_id,
                author_id: f.author_id,
                published_date: f.published_date,
                book: None,
                author: None,
            };
            rows.push(row.clone());
            Ok(row)
        });

        let report = Seeder::new(Arc::new(mock), config())
            .with_seed(7)
            .run()
            .await
            .unwrap();

        assert_eq!(
            report,
            SeedReport { categories: 3, authors: 4, books: 6, publications: 6 }
        );

        let categories = tables.categories.lock().unwrap();
        let mut names: Vec<_> = categories.iter().map(|c| c.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3, "category names are unique");

        for author in tables.authors.lock().unwrap().iter() {
            assert!(crate::services::is_phone_number(&author.phone_number));
        }

        let oldest = Utc::now().date_naive() - Duration::days(18 * 365);
        for publication in tables.publications.lock().unwrap().iter() {
            assert!(publication.published_date >= oldest);
            assert!((1..=4).contains(&publication.author_id));
        }
        for book in tables.books.lock().unwrap().iter() {
            assert!(book.price >= Decimal::new(3_000_000, 2));
        }
    }
}
