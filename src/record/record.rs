use chrono::Datelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{RecordChanges, Status};

pub const MIN_YEAR: i32 = 1888;
pub const MAX_YEAR_AHEAD: i32 = 5;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Latest accepted release year: the current calendar year plus `MAX_YEAR_AHEAD`.
pub fn max_year() -> i32 {
    chrono::Local::now().year() + MAX_YEAR_AHEAD
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("id must not be empty")]
    EmptyId,
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("author must not be empty")]
    EmptyAuthor,
    #[error("year {year} is outside {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(u8),
    #[error("status is missing")]
    MissingStatus,
}

/// A movie in the collection.
///
/// Every public way of building or changing a `Record` validates the complete
/// candidate state first, so an invalid record is never observable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordData")]
pub struct Record {
    id: String,
    title: String,
    author: String,
    year: i32,
    category: String,
    rating: u8,
    status: Status,
}

impl Record {
    /// Create a record with a fresh id.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        category: impl Into<String>,
        rating: u8,
        status: Status,
    ) -> Result<Self, ValidationError> {
        Record::builder()
            .title(title)
            .author(author)
            .year(year)
            .category(category)
            .rating(rating)
            .status(status)
            .build()
    }

    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Apply a set of changes atomically: either every change is committed or
    /// the record is left as it was.
    pub fn apply(&mut self, changes: &RecordChanges) -> Result<(), ValidationError> {
        let mut candidate = self.clone();
        if let Some(title) = &changes.title {
            candidate.title = title.clone();
        }
        if let Some(author) = &changes.author {
            candidate.author = author.clone();
        }
        if let Some(year) = changes.year {
            candidate.year = year;
        }
        if let Some(category) = &changes.category {
            candidate.category = category.clone();
        }
        if let Some(rating) = changes.rating {
            candidate.rating = rating;
        }
        if let Some(status) = changes.status {
            candidate.status = status;
        }
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        self.apply(&RecordChanges {
            title: Some(title.into()),
            ..RecordChanges::default()
        })
    }

    pub fn set_author(&mut self, author: impl Into<String>) -> Result<(), ValidationError> {
        self.apply(&RecordChanges {
            author: Some(author.into()),
            ..RecordChanges::default()
        })
    }

    pub fn set_year(&mut self, year: i32) -> Result<(), ValidationError> {
        self.apply(&RecordChanges {
            year: Some(year),
            ..RecordChanges::default()
        })
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> Result<(), ValidationError> {
        self.apply(&RecordChanges {
            category: Some(category.into()),
            ..RecordChanges::default()
        })
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<(), ValidationError> {
        self.apply(&RecordChanges {
            rating: Some(rating),
            ..RecordChanges::default()
        })
    }

    pub fn set_status(&mut self, status: Status) -> Result<(), ValidationError> {
        self.apply(&RecordChanges {
            status: Some(status),
            ..RecordChanges::default()
        })
    }

    /// Copy every field except the id from `other`.
    pub(crate) fn overwrite_fields(&mut self, other: &Record) {
        self.title = other.title.clone();
        self.author = other.author.clone();
        self.year = other.year;
        self.category = other.category.clone();
        self.rating = other.rating;
        self.status = other.status;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        let max = max_year();
        if self.year < MIN_YEAR || self.year > max {
            return Err(ValidationError::YearOutOfRange {
                year: self.year,
                min: MIN_YEAR,
                max,
            });
        }
        if self.rating < MIN_RATING || self.rating > MAX_RATING {
            return Err(ValidationError::RatingOutOfRange(self.rating));
        }
        Ok(())
    }
}

/// Builder for [`Record`]. Missing numeric fields count as out of range and a
/// missing status is rejected, mirroring a zero-initialised form.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    id: Option<String>,
    title: Option<String>,
    author: Option<String>,
    year: Option<i32>,
    category: Option<String>,
    rating: Option<u8>,
    status: Option<Status>,
}

impl RecordBuilder {
    /// Keep an existing id instead of generating one (used when reading files).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn maybe_status(mut self, status: Option<Status>) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Result<Record, ValidationError> {
        let record = Record {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
            status: self.status.unwrap_or(Status::ToWatch),
        };
        record.validate()?;
        if self.status.is_none() {
            return Err(ValidationError::MissingStatus);
        }
        Ok(record)
    }
}

/// Unvalidated wire shape; deserialization goes through `Record::try_from`.
#[derive(Deserialize)]
struct RecordData {
    id: String,
    title: String,
    author: String,
    year: i32,
    #[serde(default)]
    category: String,
    rating: u8,
    status: Option<Status>,
}

impl TryFrom<RecordData> for Record {
    type Error = ValidationError;

    fn try_from(data: RecordData) -> Result<Self, Self::Error> {
        Record::builder()
            .id(data.id)
            .title(data.title)
            .author(data.author)
            .year(data.year)
            .category(data.category)
            .rating(data.rating)
            .maybe_status(data.status)
            .build()
    }
}
