//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod category;
pub mod listing;
pub mod publication;

// Re-export commonly used types
pub use author::{Author, AuthorForm};
pub use book::{Book, BookForm};
pub use category::{Category, CategoryForm};
pub use listing::{BookListParams, ListParams, SelectOption};
pub use publication::{Publication, PublicationForm};
