use super::Status;

/// A partial edit of a record. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub rating: Option<u8>,
    pub status: Option<Status>,
}

impl RecordChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.year.is_none()
            && self.category.is_none()
            && self.rating.is_none()
            && self.status.is_none()
    }
}
