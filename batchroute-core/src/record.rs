//! Parsing of batch input records.
//!
//! A record is one line of the form
//! `origin_lat,origin_lng,dest_lat,dest_lng`. The line must split into
//! exactly [`FIELD_COUNT`] comma-separated fields and every field must be
//! a complete, finite decimal number. Surrounding whitespace inside a
//! field is tolerated; anything else trailing the number is not.

use std::fmt;

use thiserror::Error;

use crate::{Coordinate, RouteQuery};

/// Number of comma-separated fields in a record.
pub const FIELD_COUNT: usize = 4;

/// Position of a field within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// First field.
    OriginLatitude,
    /// Second field.
    OriginLongitude,
    /// Third field.
    DestinationLatitude,
    /// Fourth field.
    DestinationLongitude,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OriginLatitude => "origin latitude",
            Self::OriginLongitude => "origin longitude",
            Self::DestinationLatitude => "destination latitude",
            Self::DestinationLongitude => "destination longitude",
        };
        f.write_str(name)
    }
}

/// Reasons a line is not a valid record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line did not split into [`FIELD_COUNT`] fields.
    #[error("expected 4 comma-separated fields, found {found}")]
    FieldCount {
        /// Number of fields present.
        found: usize,
    },
    /// A field was not a finite decimal number.
    #[error("{field} {value:?} is not a decimal number")]
    InvalidNumber {
        /// Which field failed.
        field: RecordField,
        /// The offending text.
        value: String,
    },
}

/// A parsed record borrowing its source line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<'a> {
    line: &'a str,
    query: RouteQuery,
}

impl<'a> Record<'a> {
    /// Parse one line, without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::FieldCount`] when the line does not hold
    /// exactly four fields and [`RecordError::InvalidNumber`] for the first
    /// field that is not a finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use batchroute_core::Record;
    ///
    /// let record = Record::parse("52.5,13.4,52.6,13.5")?;
    /// assert_eq!(record.line(), "52.5,13.4,52.6,13.5");
    /// assert_eq!(record.query().origin.longitude, 13.4);
    /// assert_eq!(record.query().destination.latitude, 52.6);
    /// # Ok::<(), batchroute_core::RecordError>(())
    /// ```
    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(',').collect();
        let &[origin_lat, origin_lng, destination_lat, destination_lng] = fields.as_slice() else {
            return Err(RecordError::FieldCount {
                found: fields.len(),
            });
        };

        let origin = Coordinate {
            latitude: parse_degrees(RecordField::OriginLatitude, origin_lat)?,
            longitude: parse_degrees(RecordField::OriginLongitude, origin_lng)?,
        };
        let destination = Coordinate {
            latitude: parse_degrees(RecordField::DestinationLatitude, destination_lat)?,
            longitude: parse_degrees(RecordField::DestinationLongitude, destination_lng)?,
        };

        Ok(Self {
            line,
            query: RouteQuery {
                origin,
                destination,
            },
        })
    }

    /// The source line, verbatim.
    #[must_use]
    pub const fn line(&self) -> &'a str {
        self.line
    }

    /// The route query this record describes.
    #[must_use]
    pub const fn query(&self) -> RouteQuery {
        self.query
    }
}

fn parse_degrees(field: RecordField, raw: &str) -> Result<f64, RecordError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RecordError::InvalidNumber {
            field,
            value: raw.to_owned(),
        })
}
