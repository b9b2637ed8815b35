//! Request parameter decoding.
//!
//! Calendar endpoints take flat, untyped parameters. Values may arrive in the
//! query string or in the body (form-encoded or a flat JSON object); the body
//! wins when both carry the same name.

use std::collections::HashMap;

use chrono::{Days, Months, NaiveDate};
use lambda_http::{Request, RequestExt, RequestPayloadExt};
use serde_json::Value;

use crate::models::DateRange;
use crate::{Error, Result};

/// Wire format of every date parameter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters collected from a single request.
#[derive(Debug, Default)]
pub struct RequestParams {
    query: HashMap<String, String>,
    body: HashMap<String, String>,
}

impl RequestParams {
    /// Collect parameters from the query string and body of `event`.
    pub fn from_request(event: &Request) -> Result<Self> {
        let mut query = HashMap::new();
        for (key, value) in event.query_string_parameters().iter() {
            query.entry(key.to_string()).or_insert_with(|| value.to_string());
        }

        let body = match event.payload::<HashMap<String, Value>>() {
            Ok(Some(fields)) => fields
                .into_iter()
                .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key, v)))
                .collect(),
            Ok(None) => HashMap::new(),
            Err(e) => {
                return Err(Error::Validation(format!("Unable to parse request body: {}", e)));
            }
        };

        Ok(Self { query, body })
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.body
            .get(name)
            .or_else(|| self.query.get(name))
            .map(String::as_str)
    }

    fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| Error::Validation(format!("missing parameter: {}", name)))
    }

    pub fn user_id(&self) -> Result<i64> {
        parse_positive_id("user_id", self.require("user_id")?)
    }

    /// `user_id` when present, for endpoints where it only narrows the scope.
    pub fn optional_user_id(&self) -> Result<Option<i64>> {
        self.get("user_id")
            .map(|raw| parse_positive_id("user_id", raw))
            .transpose()
    }

    pub fn id(&self) -> Result<i64> {
        parse_positive_id("id", self.require("id")?)
    }

    pub fn date(&self) -> Result<NaiveDate> {
        parse_date(self.require("date")?)
    }

    /// The raw title; trimming and emptiness checks belong to the commands.
    pub fn title(&self) -> Result<&str> {
        self.require("title")
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a strictly positive integer identifier.
pub fn parse_positive_id(name: &str, raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(Error::Validation(format!(
            "{} must be a positive integer",
            name
        ))),
    }
}

/// Parse a `YYYY-MM-DD` date. Anything other than the zero-padded form is rejected.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let well_formed = raw.len() == 10
        && raw.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !well_formed {
        return Err(Error::Validation(
            "date must use the YYYY-MM-DD format".to_string(),
        ));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| Error::Validation(format!("invalid date {}: {}", raw, e)))
}

/// Range covering `start` and the seven calendar days after it.
pub fn week_range(start: NaiveDate) -> Result<DateRange> {
    let end = start
        .checked_add_days(Days::new(7))
        .ok_or_else(|| Error::Validation(format!("date {} is out of range", start)))?;
    DateRange::new(start, end)
}

/// Range from `start` to the same day next month.
///
/// When next month is shorter the end clamps to its last day, so
/// `2024-01-31` ends on `2024-02-29`.
pub fn month_range(start: NaiveDate) -> Result<DateRange> {
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| Error::Validation(format!("date {} is out of range", start)))?;
    DateRange::new(start, end)
}
