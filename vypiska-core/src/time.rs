//! Date parsing for the fixed `DD.MM.YYYY[ HH:MM]` statement format.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ExtractError, Result};

pub const OPERATION_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";
pub const PROCESSING_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse an operation timestamp like "29.08.2019 10:04".
pub fn parse_operation_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), OPERATION_DATETIME_FORMAT)
        .map_err(|_| ExtractError::malformed_date(s, "DD.MM.YYYY HH:MM"))
}

/// Parse a processing date like "29.08.2019".
pub fn parse_processing_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), PROCESSING_DATE_FORMAT)
        .map_err(|_| ExtractError::malformed_date(s, "DD.MM.YYYY"))
}
