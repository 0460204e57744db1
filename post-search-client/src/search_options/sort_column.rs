use strum_macros::{Display, EnumIter, EnumString};

/// Field a result set can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SortColumn {
    #[default]
    Id,
    Reads,
    Likes,
    Popularity,
}
