use std::fmt;

/// Request field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOption {
    Tags,
    SortBy,
    Direction,
}

impl SearchOption {
    pub fn message(&self) -> &'static str {
        match self {
            SearchOption::Tags => "Tags parameter is required",
            SearchOption::SortBy => "sortBy paramater is invalid",
            SearchOption::Direction => "direction paramater is invalid",
        }
    }
}

impl fmt::Display for SearchOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchOption::Tags => "tags",
            SearchOption::SortBy => "sortBy",
            SearchOption::Direction => "direction",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .option.message())]
pub struct InvalidOptionError {
    option: SearchOption,
}

impl InvalidOptionError {
    pub fn new(option: SearchOption) -> Self {
        Self { option }
    }

    pub fn option(&self) -> SearchOption {
        self.option
    }
}
