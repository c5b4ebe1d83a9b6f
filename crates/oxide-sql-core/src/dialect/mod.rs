//! SQL Dialect support.
//!
//! Different databases quote, escape and limit things differently. This
//! module provides a trait for the dialect-specific parts that every
//! compiler needs: identifier quoting, literal quoting and the engine's
//! hard limits.

use crate::value::quote_literal;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the string escape sequence for an embedded single quote.
    fn string_escape(&self) -> &'static str {
        "''"
    }

    /// Returns the parameter placeholder style.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Maximum identifier length in characters, if the engine has one.
    fn max_identifier_length(&self) -> Option<usize> {
        None
    }

    /// Maximum number of values in a single IN list, if the engine has one.
    fn max_in_list_size(&self) -> Option<usize> {
        None
    }

    /// Returns whether the dialect supports CREATE TEMPORARY TABLE.
    fn supports_temporary_tables(&self) -> bool {
        true
    }

    /// Quotes an identifier, doubling embedded quote characters.
    ///
    /// `*` is returned unquoted.
    fn quote_identifier(&self, name: &str) -> String {
        if name == "*" {
            return String::from("*");
        }
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    /// Quotes each identifier and joins them with `, `.
    fn quote_identifiers(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|name| self.quote_identifier(name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Quotes a string literal.
    fn quote_string(&self, value: &str) -> String {
        if self.string_escape() == "''" {
            return quote_literal(value);
        }
        format!("'{}'", value.replace('\'', self.string_escape()))
    }

    /// Truncates an identifier to the engine's maximum length.
    fn truncate_identifier(&self, name: &str) -> String {
        match self.max_identifier_length() {
            Some(max) => name.chars().take(max).collect(),
            None => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A dialect relying on every default.
    struct Plain;

    impl Dialect for Plain {
        fn name(&self) -> &'static str {
            "plain"
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Plain.identifier_quote(), '"');
        assert_eq!(Plain.parameter_placeholder(), "?");
        assert_eq!(Plain.max_identifier_length(), None);
        assert_eq!(Plain.max_in_list_size(), None);
        assert!(Plain.supports_temporary_tables());
    }

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        assert_eq!(Plain.quote_identifier("users"), "\"users\"");
        assert_eq!(Plain.quote_identifier("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(Plain.quote_identifier("*"), "*");
    }

    #[test]
    fn test_quote_identifiers_and_strings() {
        let names = vec![String::from("a"), String::from("b")];
        assert_eq!(Plain.quote_identifiers(&names), "\"a\", \"b\"");
        assert_eq!(Plain.quote_string("it's"), "'it''s'");
    }

    #[test]
    fn test_truncate_without_limit_is_identity() {
        let long = "x".repeat(100);
        assert_eq!(Plain.truncate_identifier(&long), long);
    }
}
