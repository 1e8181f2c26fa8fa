//! `name: value` records used by the player database files

use crate::error::DatabaseError;
use std::str::FromStr;

const DELIM: &str = ": ";

/// One parsed database line, borrowing from the line it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseEntry<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> DatabaseEntry<'a> {
    /// Split `line` at the first `": "`
    ///
    /// # Errors
    /// Returns [`DatabaseError::MissingDelimiter`] if the line has no `": "`.
    ///
    /// # Examples
    /// ```
    /// use wordle_stats::players::DatabaseEntry;
    ///
    /// let entry = DatabaseEntry::from_line("Username: ben").unwrap();
    /// assert_eq!(entry.name(), "Username");
    /// assert_eq!(entry.value(), "ben");
    /// ```
    pub fn from_line(line: &'a str) -> Result<Self, DatabaseError> {
        let (name, value) = line
            .split_once(DELIM)
            .ok_or_else(|| DatabaseError::MissingDelimiter(line.to_string()))?;
        Ok(Self { name, value })
    }

    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> &'a str {
        self.value
    }

    /// Check the field name, returning the entry on a match
    ///
    /// # Errors
    /// Returns [`DatabaseError::UnexpectedField`] on a mismatch.
    pub fn expect_name(self, expected: &'static str) -> Result<Self, DatabaseError> {
        if self.name == expected {
            Ok(self)
        } else {
            Err(DatabaseError::UnexpectedField {
                expected,
                found: self.name.to_string(),
            })
        }
    }

    /// Parse the whole value
    ///
    /// # Errors
    /// Returns [`DatabaseError::InvalidValue`] if the value does not parse.
    pub fn parse_value<T: FromStr>(&self) -> Result<T, DatabaseError> {
        parse_token(self.name, self.value)
    }

    /// Split the value on `,` and hand each parsed token to `stage`
    ///
    /// Empty tokens are skipped, so an empty value yields no items.
    ///
    /// # Errors
    /// Returns the first error from `parse`.
    pub fn parse_list<T>(
        &self,
        mut parse: impl FnMut(&'a str) -> Result<T, DatabaseError>,
        mut stage: impl FnMut(T),
    ) -> Result<(), DatabaseError> {
        for token in self.value.split(',').filter(|token| !token.is_empty()) {
            stage(parse(token)?);
        }
        Ok(())
    }
}

/// Parse one token of field `field`
///
/// # Errors
/// Returns [`DatabaseError::InvalidValue`] if the token does not parse.
pub fn parse_token<T: FromStr>(field: &str, token: &str) -> Result<T, DatabaseError> {
    token.trim().parse().map_err(|_| DatabaseError::InvalidValue {
        field: field.to_string(),
        value: token.to_string(),
    })
}
