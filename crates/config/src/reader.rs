//! Field-by-field validation over a decoded configuration table.

use crate::error::{FieldError, FieldErrors};
use crate::ConfigTable;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Display;

/// Reads typed fields out of a [`ConfigTable`], recording a [`FieldError`]
/// for every mistyped, invalid, or unknown field.
///
/// Accessors return `None` both for absent fields and for fields that failed
/// validation, so callers can fall back to defaults and keep going; the
/// accumulated failures surface from [`FieldReader::finish`]. An explicit
/// `null` is treated as "unset".
pub struct FieldReader<'a> {
    table: &'a ConfigTable,
    prefix: String,
    seen: HashSet<String>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub fn new(table: &'a ConfigTable) -> Self {
        Self::with_prefix(table, String::new())
    }

    fn with_prefix(table: &'a ConfigTable, prefix: String) -> Self {
        Self {
            table,
            prefix,
            seen: HashSet::new(),
            errors: Vec::new(),
        }
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    fn take(&mut self, key: &str) -> Option<&'a Value> {
        self.seen.insert(key.to_string());
        self.table.get(key).filter(|v| !v.is_null())
    }

    /// Records a failure against `key` (relative to this reader's group).
    pub fn error(&mut self, key: &str, message: impl Into<String>) {
        let field = self.path(key);
        self.errors.push(FieldError::new(field, message));
    }

    /// Returns `true` if `key` is present with a non-null value.
    pub fn is_set(&self, key: &str) -> bool {
        self.table.get(key).is_some_and(|v| !v.is_null())
    }

    pub fn string(&mut self, key: &str) -> Option<String> {
        match self.take(key)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.error(key, format!("expected a string, found {}", describe(other)));
                None
            }
        }
    }

    pub fn boolean(&mut self, key: &str) -> Option<bool> {
        match self.take(key)? {
            Value::Bool(b) => Some(*b),
            other => {
                self.error(key, format!("expected a boolean, found {}", describe(other)));
                None
            }
        }
    }

    pub fn integer(&mut self, key: &str) -> Option<i32> {
        let value = self.take(key)?;
        match value.as_i64().map(i32::try_from) {
            Some(Ok(n)) => Some(n),
            Some(Err(_)) => {
                self.error(key, format!("integer {} is out of range", value));
                None
            }
            None => {
                self.error(key, format!("expected an integer, found {}", describe(value)));
                None
            }
        }
    }

    /// Reads a strictly positive integer.
    pub fn positive(&mut self, key: &str) -> Option<u32> {
        let n = self.integer(key)?;
        match u32::try_from(n) {
            Ok(n) if n > 0 => Some(n),
            _ => {
                self.error(key, format!("expected a positive integer, found {}", n));
                None
            }
        }
    }

    /// Reads a string and converts it with `parse`, recording the parser's
    /// message on failure.
    pub fn parsed<T, E, F>(&mut self, key: &str, parse: F) -> Option<T>
    where
        E: Display,
        F: FnOnce(&str) -> Result<T, E>,
    {
        let raw = self.string(key)?;
        match parse(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                self.error(key, e.to_string());
                None
            }
        }
    }

    /// Reads a nested table as a group, validating it with `read`.
    ///
    /// Failures inside the group are reported with the group name as a
    /// prefix (`bullet.font_size`), and unknown keys inside the group are
    /// rejected like top-level ones.
    pub fn group<T, F>(&mut self, key: &str, read: F) -> Option<T>
    where
        F: FnOnce(&mut FieldReader<'a>) -> T,
    {
        match self.take(key)? {
            Value::Object(table) => {
                let mut child = FieldReader::with_prefix(table, self.path(key));
                let value = read(&mut child);
                child.reject_unknown();
                self.errors.append(&mut child.errors);
                Some(value)
            }
            other => {
                self.error(key, format!("expected a table, found {}", describe(other)));
                None
            }
        }
    }

    fn reject_unknown(&mut self) {
        let unknown: Vec<String> = self
            .table
            .keys()
            .filter(|k| !self.seen.contains(k.as_str()))
            .cloned()
            .collect();
        for key in unknown {
            self.error(&key, "extra fields are not permitted");
        }
    }

    /// Consumes the reader, returning every failure recorded so far plus one
    /// for each key that was never read.
    pub fn finish(mut self) -> Result<(), FieldErrors> {
        self.reject_unknown();
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FieldErrors(self.errors))
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string '{}'", s),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "a table".to_string(),
    }
}
