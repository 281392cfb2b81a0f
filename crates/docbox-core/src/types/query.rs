//! Query model for the document store.
//!
//! A [`DocumentQuery`] is an ordered list of filter predicates plus an
//! optional sort and result cap. Backends translate it into their own wire
//! form; the in-memory backend evaluates it directly.

use serde::{Deserialize, Serialize};

/// System attribute holding a document's creation timestamp.
pub const ATTR_CREATED_AT: &str = "$createdAt";

/// System attribute holding a document's last-update timestamp.
pub const ATTR_UPDATED_AT: &str = "$updatedAt";

/// A single filter predicate on document attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Attribute equals any of the given values.
    Equal {
        /// Attribute name.
        field: String,
        /// Accepted values (single-element for plain equality).
        values: Vec<String>,
    },
    /// Attribute contains the value — substring match for string attributes,
    /// membership for list attributes.
    Contains {
        /// Attribute name.
        field: String,
        /// Value to look for.
        value: String,
    },
    /// Any of the nested predicates matches.
    Or(Vec<Filter>),
}

impl Filter {
    /// Equality against a single value.
    pub fn equal(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equal {
            field: field.into(),
            values: vec![value.into()],
        }
    }

    /// Equality against any of several values.
    pub fn equal_any(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::Equal {
            field: field.into(),
            values,
        }
    }

    /// Containment predicate.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Disjunction of predicates.
    pub fn or(filters: Vec<Filter>) -> Self {
        Self::Or(filters)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// A sort specification consisting of an attribute name and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Attribute to sort by.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create an ascending sort on the given attribute.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Create a descending sort on the given attribute.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse a `"field-asc"` / `"field-desc"` sort key.
    ///
    /// The key is split on the LAST `-` so attribute names may themselves
    /// contain dashes. Keys without a separator (or with an empty field part)
    /// fall back to the default: creation time, newest first. Direction
    /// tokens other than `asc` sort descending.
    pub fn parse(key: &str) -> Self {
        match key.rsplit_once('-') {
            Some((field, direction)) if !field.is_empty() => {
                if direction == "asc" {
                    Self::asc(field)
                } else {
                    Self::desc(field)
                }
            }
            _ => Self::default(),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::desc(ATTR_CREATED_AT)
    }
}

/// A composed document query: ordered filters, optional sort, optional cap.
///
/// No pagination cursor is modeled; callers needing more than `limit`
/// results have no continuation mechanism.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentQuery {
    /// Filter predicates, ANDed together in order.
    pub filters: Vec<Filter>,
    /// Result ordering.
    pub sort: Option<SortSpec>,
    /// Maximum number of documents to return.
    pub limit: Option<u32>,
}

impl DocumentQuery {
    /// An empty query matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter predicate.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the sort specification.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Cap the result count.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
