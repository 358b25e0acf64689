//! Sortable columns and search fields of each entity

use std::cmp::Ordering;

use super::{Listable, Relations, SortField};
use crate::models::{Author, Book, Category, Publication};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Id,
    Name,
}

impl SortField for CategoryField {
    type Row = Category;

    const ALL: &'static [Self] = &[CategoryField::Id, CategoryField::Name];
    const DEFAULT: Self = CategoryField::Id;

    fn name(self) -> &'static str {
        match self {
            CategoryField::Id => "id",
            CategoryField::Name => "name",
        }
    }

    fn compare(self, a: &Category, b: &Category) -> Ordering {
        match self {
            CategoryField::Id => a.id.cmp(&b.id),
            CategoryField::Name => a.name.cmp(&b.name),
        }
    }
}

impl Listable for Category {
    type Field = CategoryField;

    const DISPLAY_RELATIONS: Relations = Relations::NONE;
    const SEARCH_RELATIONS: Relations = Relations::NONE;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str())]
    }
}

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    Id,
    Name,
    BirthDate,
    Email,
}

impl SortField for AuthorField {
    type Row = Author;

    const ALL: &'static [Self] = &[
        AuthorField::Id,
        AuthorField::Name,
        AuthorField::BirthDate,
        AuthorField::Email,
    ];
    const DEFAULT: Self = AuthorField::Id;

    fn name(self) -> &'static str {
        match self {
            AuthorField::Id => "id",
            AuthorField::Name => "name",
            AuthorField::BirthDate => "birthDate",
            AuthorField::Email => "email",
        }
    }

    fn compare(self, a: &Author, b: &Author) -> Ordering {
        match self {
            AuthorField::Id => a.id.cmp(&b.id),
            AuthorField::Name => a.full_name.cmp(&b.full_name),
            AuthorField::BirthDate => a.birth_date.cmp(&b.birth_date),
            AuthorField::Email => a.email.cmp(&b.email),
        }
    }
}

impl Listable for Author {
    type Field = AuthorField;

    const DISPLAY_RELATIONS: Relations = Relations::NONE;
    const SEARCH_RELATIONS: Relations = Relations::NONE;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.full_name.as_str()), self.email.as_deref()]
    }
}

// ---------------------------------------------------------------------------
// Book
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Id,
    Name,
    Price,
    Category,
}

fn category_name(book: &Book) -> Option<&str> {
    book.category.as_ref().map(|c| c.name.as_str())
}

impl SortField for BookField {
    type Row = Book;

    const ALL: &'static [Self] = &[
        BookField::Id,
        BookField::Name,
        BookField::Price,
        BookField::Category,
    ];
    const DEFAULT: Self = BookField::Id;

    fn name(self) -> &'static str {
        match self {
            BookField::Id => "id",
            BookField::Name => "name",
            BookField::Price => "price",
            BookField::Category => "category",
        }
    }

    fn relations(self) -> Relations {
        match self {
            BookField::Category => Relations::CATEGORY,
            _ => Relations::NONE,
        }
    }

    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            BookField::Id => a.id.cmp(&b.id),
            BookField::Name => a.name.cmp(&b.name),
            BookField::Price => a.price.cmp(&b.price),
            BookField::Category => category_name(a).cmp(&category_name(b)),
        }
    }
}

impl Listable for Book {
    type Field = BookField;

    const DISPLAY_RELATIONS: Relations = Relations::CATEGORY;
    const SEARCH_RELATIONS: Relations = Relations::NONE;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str())]
    }
}

// ---------------------------------------------------------------------------
// Publication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationField {
    Id,
    BookName,
    AuthorName,
    Date,
}

fn book_name(publication: &Publication) -> Option<&str> {
    publication.book.as_ref().map(|b| b.name.as_str())
}

fn author_name(publication: &Publication) -> Option<&str> {
    publication.author.as_ref().map(|a| a.full_name.as_str())
}

impl SortField for PublicationField {
    type Row = Publication;

    const ALL: &'static [Self] = &[
        PublicationField::Id,
        PublicationField::BookName,
        PublicationField::AuthorName,
        PublicationField::Date,
    ];
    const DEFAULT: Self = PublicationField::Id;

    fn name(self) -> &'static str {
        match self {
            PublicationField::Id => "id",
            PublicationField::BookName => "bookName",
            PublicationField::AuthorName => "authorName",
            PublicationField::Date => "date",
        }
    }

    fn relations(self) -> Relations {
        match self {
            PublicationField::BookName => Relations::BOOK,
            PublicationField::AuthorName => Relations::AUTHOR,
            _ => Relations::NONE,
        }
    }

    fn compare(self, a: &Publication, b: &Publication) -> Ordering {
        match self {
            PublicationField::Id => a.id.cmp(&b.id),
            PublicationField::BookName => book_name(a).cmp(&book_name(b)),
            PublicationField::AuthorName => author_name(a).cmp(&author_name(b)),
            PublicationField::Date => a.published_date.cmp(&b.published_date),
        }
    }
}

impl Listable for Publication {
    type Field = PublicationField;

    const DISPLAY_RELATIONS: Relations = Relations {
        category: false,
        book: true,
        author: true,
    };
    const SEARCH_RELATIONS: Relations = Relations {
        category: false,
        book: true,
        author: true,
    };

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![book_name(self), author_name(self)]
    }
}
