use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Input that cannot be turned into a valid to-do item.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid due date {0:?}: expected YYYY-MM-DDTHH:MM:SS")]
    DueDate(String),
    #[error("malformed request body: {0}")]
    Body(String),
    #[error("field `{field}` must be {expected}")]
    FieldType { field: &'static str, expected: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToDoId(pub i64);

impl fmt::Display for ToDoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl FromStr for ToDoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { s.trim().parse().map(ToDoId) }
}

/// Local date-time without offset, accepted only in ISO-8601 form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DueDate(pub NaiveDateTime);

/// `YYYY-MM-DDTHH:MM`, optionally followed by `:SS` and then `.` plus 1-9 digits.
/// chrono alone accepts single-digit fields, signs and padding, so the shape is
/// checked byte by byte first.
fn has_iso_shape(text: &str) -> bool {
    const MINUTES: &[u8] = b"dddd-dd-ddTdd:dd";
    let bytes = text.as_bytes();
    let fixed = |pattern: &[u8], at: &[u8]| {
        pattern.len() == at.len()
            && pattern.iter().zip(at).all(|(p, b)| if *p == b'd' { b.is_ascii_digit() } else { p == b })
    };
    if bytes.len() < MINUTES.len() || !fixed(MINUTES, &bytes[..MINUTES.len()]) {
        return false;
    }
    let rest = &bytes[MINUTES.len()..];
    if rest.is_empty() {
        return true;
    }
    if rest.len() < 3 || !fixed(&b":dd"[..], &rest[..3]) {
        return false;
    }
    match &rest[3..] {
        [] => true,
        [b'.', fraction @ ..] => (1..=9).contains(&fraction.len()) && fraction.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

impl DueDate {
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::DueDate(text.to_string());
        if !has_iso_shape(text) {
            return Err(invalid());
        }
        let format = if text.len() == 16 { "%Y-%m-%dT%H:%M" } else { "%Y-%m-%dT%H:%M:%S%.f" };
        let parsed = NaiveDateTime::parse_from_str(text, format).map_err(|_| invalid())?;
        // chrono represents a leap second as nanosecond >= 1_000_000_000
        if parsed.nanosecond() >= 1_000_000_000 {
            return Err(invalid());
        }
        Ok(DueDate(parsed))
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.nanosecond() == 0 {
            write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
        } else {
            write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.f"))
        }
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToDo {
    pub id: ToDoId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DueDate>,
}

/// Fields of an item that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewToDo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DueDate>,
}

impl NewToDo {
    pub fn set_due_date(&mut self, text: &str) -> Result<(), ValidationError> {
        self.due_date = Some(DueDate::parse(text)?);
        Ok(())
    }
}

/// Changes to an existing item. The outer `Option` says whether the field
/// was supplied at all; the inner one carries the new value or null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToDoPatch {
    pub title: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<DueDate>>,
}

impl ToDoPatch {
    pub fn set_due_date(&mut self, text: &str) -> Result<(), ValidationError> {
        self.due_date = Some(Some(DueDate::parse(text)?));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_date.is_none()
    }

    pub fn apply_to(self, item: &mut ToDo) {
        if let Some(t) = self.title { item.title = t; }
        if let Some(d) = self.description { item.description = d; }
        if let Some(due) = self.due_date { item.due_date = due; }
    }
}
