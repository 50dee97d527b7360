use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid calendar fields: {year:04}-{month:02}-{day:02}")]
    InvalidCalendarFields { year: i32, month: u32, day: u32 },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
