mod changes;
mod record;
mod status;

pub use changes::RecordChanges;
pub use record::{
    max_year, Record, RecordBuilder, ValidationError, MAX_RATING, MAX_YEAR_AHEAD, MIN_RATING,
    MIN_YEAR,
};
pub use status::{ParseStatusError, Status};
