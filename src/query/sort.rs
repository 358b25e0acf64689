//! Sort tokens: `<field>_<asc|desc>` mapped to a (field, direction) pair

use std::cmp::Ordering;
use std::fmt::Debug;

use indexmap::IndexMap;

use super::Relations;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// A sortable column of one entity type
pub trait SortField: Copy + Eq + Debug + 'static {
    type Row;

    /// Every sortable column, in display order
    const ALL: &'static [Self];

    /// Column used when the token is absent or unrecognized
    const DEFAULT: Self;

    /// Token prefix, e.g. `birthDate`
    fn name(self) -> &'static str;

    /// Relations that must be resolved for `compare` to see the key
    fn relations(self) -> Relations {
        Relations::NONE
    }

    /// Ascending comparison of the column's key
    fn compare(self, a: &Self::Row, b: &Self::Row) -> Ordering;
}

/// Parsed sort token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse a token; anything unrecognized yields ascending by the default column
    pub fn parse(token: Option<&str>) -> Self {
        token
            .and_then(|t| t.rsplit_once('_'))
            .and_then(|(name, dir)| {
                let direction = SortDirection::parse(dir)?;
                let field = F::ALL.iter().copied().find(|f| f.name() == name)?;
                Some(Self::new(field, direction))
            })
            .unwrap_or_else(|| Self::new(F::DEFAULT, SortDirection::Asc))
    }

    pub fn token(&self) -> String {
        format!("{}_{}", self.field.name(), self.direction.as_str())
    }

    /// Token a header for `field` should link to: flips the direction when
    /// `field` is the active ascending column, ascending otherwise.
    pub fn toggle(&self, field: F) -> String {
        let direction = if self.field == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self::new(field, direction).token()
    }

    pub fn column_links(&self) -> IndexMap<String, String> {
        F::ALL
            .iter()
            .map(|f| (f.name().to_string(), self.toggle(*f)))
            .collect()
    }

    pub fn compare(&self, a: &F::Row, b: &F::Row) -> Ordering {
        match self.direction {
            SortDirection::Asc => self.field.compare(a, b),
            SortDirection::Desc => self.field.compare(b, a),
        }
    }
}
