pub mod invalid_option_error;
pub mod order;
pub mod sort_column;

use getset::{CopyGetters, Getters};
use invalid_option_error::{InvalidOptionError, SearchOption};
use order::Order;
use sort_column::SortColumn;
use std::str::FromStr;

/// A validated aggregation request.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct SearchOptions {
    #[getset(get = "pub")]
    tags: Vec<String>,
    #[getset(get_copy = "pub")]
    sort: SortColumn,
    #[getset(get_copy = "pub")]
    order: Order,
}

impl SearchOptions {
    /// Build options directly. `tags` must not be empty.
    pub fn new(tags: Vec<String>, sort: SortColumn, order: Order) -> Result<Self, InvalidOptionError> {
        let tags = normalize_tags(tags.iter().map(String::as_str));
        if tags.is_empty() {
            return Err(InvalidOptionError::new(SearchOption::Tags));
        }
        Ok(Self { tags, sort, order })
    }

    /// Validate raw request fields.
    ///
    /// `tags` is a comma separated list. Missing or empty `sort_by` and
    /// `direction` fall back to `id` and `asc`. Fields are checked in the
    /// order tags, sortBy, direction and the first failure is returned.
    pub fn parse(
        tags: Option<&str>,
        sort_by: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Self, InvalidOptionError> {
        let tags = normalize_tags(tags.unwrap_or_default().split(','));
        if tags.is_empty() {
            return Err(InvalidOptionError::new(SearchOption::Tags));
        }

        let sort = match sort_by.filter(|value| !value.is_empty()) {
            Some(value) => SortColumn::from_str(value)
                .map_err(|_| InvalidOptionError::new(SearchOption::SortBy))?,
            None => SortColumn::default(),
        };

        let order = match direction.filter(|value| !value.is_empty()) {
            Some(value) => {
                Order::from_str(value).map_err(|_| InvalidOptionError::new(SearchOption::Direction))?
            }
            None => Order::default(),
        };

        Ok(Self { tags, sort, order })
    }
}

// Trims, drops empty segments and keeps the first occurrence of repeated tags.
fn normalize_tags<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.map(str::trim).filter(|tag| !tag.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
