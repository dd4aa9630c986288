use crate::record::{Record, Status};

/// Category sentinel meaning "do not filter by category".
pub const ALL_CATEGORIES: &str = "All";

/// Criteria combined with AND. Every unset criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: Option<String>,
    pub category: Option<String>,
    pub status: Option<Status>,
    pub min_rating: Option<u8>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn min_rating(mut self, min_rating: u8) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        matches_query(record, self.query.as_deref())
            && matches_category(record, self.category.as_deref())
            && matches_status(record, self.status)
            && matches_min_rating(record, self.min_rating)
    }
}

/// Case-insensitive substring match on title or author. A blank query matches.
pub(crate) fn matches_query(record: &Record, query: Option<&str>) -> bool {
    let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
        return true;
    };
    let query = query.to_lowercase();
    record.title().to_lowercase().contains(&query)
        || record.author().to_lowercase().contains(&query)
}

pub(crate) fn matches_category(record: &Record, category: Option<&str>) -> bool {
    match category {
        None => true,
        Some(category) if is_all_categories(category) => true,
        Some(category) => record.category().to_lowercase() == category.to_lowercase(),
    }
}

pub(crate) fn matches_status(record: &Record, status: Option<Status>) -> bool {
    status.map_or(true, |status| record.status() == status)
}

pub(crate) fn matches_min_rating(record: &Record, min_rating: Option<u8>) -> bool {
    min_rating.map_or(true, |min| record.rating() >= min)
}

fn is_all_categories(category: &str) -> bool {
    category.trim().is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES)
}
