//! Zone alias lists
//!
//! The zone dataset stores each zone's neighborhood names as a serialized
//! list literal, e.g. `['CENTRO', 'ZONA CENTRO (OBREGON)']`. The literal is
//! parsed once here and carried as an ordered list from then on.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt, value},
    multi::separated_list0,
    sequence::{delimited, preceded, terminated},
    IResult,
};
use serde::{Serialize, Serializer};

/// Characters trimmed from both ends of every alias
const ALIAS_TRIM: &[char] = &['[', ']', '(', ')', ' '];

/// Malformed alias literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasError {
    /// The literal that failed to parse
    pub literal: String,
}

impl std::fmt::Display for AliasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Malformed alias list literal: {}", self.literal)
    }
}

impl std::error::Error for AliasError {}

/// Ordered list of neighborhood names identifying one zone
///
/// Matching uses the stripped names; [`AliasList::display`] keeps the items
/// as they appeared in the literal. Serializes as the stripped names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AliasList {
    names: Vec<String>,
    raw: Vec<String>,
    dropped: usize,
}

impl AliasList {
    /// Build from already-separated names
    ///
    /// Names are trimmed the same way as parsed literals; empty names are
    /// dropped from matching and counted in [`AliasList::dropped_empty`].
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<String> = items.into_iter().map(|n| n.as_ref().to_string()).collect();
        let names: Vec<String> = raw
            .iter()
            .map(|n| n.trim_matches(ALIAS_TRIM).to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self {
            dropped: raw.len() - names.len(),
            names,
            raw,
        }
    }

    /// Parse a list or tuple literal of quoted strings
    ///
    /// # Errors
    /// Returns error if the text is not a bracketed sequence of quoted strings
    pub fn parse_literal(literal: &str) -> Result<Self, AliasError> {
        match all_consuming(ws(sequence_literal))(literal) {
            Ok((_, items)) => Ok(Self::new(items)),
            Err(_) => Err(AliasError {
                literal: literal.to_string(),
            }),
        }
    }

    /// Alias names in order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of aliases
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when the list holds no aliases
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Items that stripped to nothing and take no part in matching
    pub fn dropped_empty(&self) -> usize {
        self.dropped
    }

    /// Display rendering: literal items joined with `", "`
    pub fn display(&self) -> String {
        self.raw.join(", ")
    }

    /// Iterate alias names
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Serialize for AliasList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names.serialize(serializer)
    }
}

impl std::str::FromStr for AliasList {
    type Err = AliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_literal(s)
    }
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn sequence_literal(input: &str) -> IResult<&str, Vec<String>> {
    alt((bracketed('[', ']'), bracketed('(', ')')))(input)
}

fn bracketed<'a>(open: char, close: char) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<String>> {
    move |input| {
        delimited(
            terminated(char(open), multispace0),
            terminated(
                separated_list0(ws(char(',')), quoted_string),
                opt(ws(char(','))),
            ),
            preceded(multispace0, char(close)),
        )(input)
    }
}

fn quoted_string(input: &str) -> IResult<&str, String> {
    alt((quoted('\'', "\\'"), quoted('"', "\\\"")))(input)
}

fn quoted<'a>(
    quote: char,
    stop: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, String> {
    move |input| {
        delimited(
            char(quote),
            map(
                opt(escaped_transform(
                    is_not(stop),
                    '\\',
                    alt((
                        value("\\", tag("\\")),
                        value("'", tag("'")),
                        value("\"", tag("\"")),
                        value("\n", tag("n")),
                        value("\t", tag("t")),
                    )),
                )),
                Option::unwrap_or_default,
            ),
            char(quote),
        )(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_quoted_list() {
        let aliases = AliasList::parse_literal("['CENTRO', 'OBREGON']").unwrap();
        assert_eq!(aliases.names(), &["CENTRO".to_string(), "OBREGON".to_string()]);
    }

    #[test]
    fn test_parse_mixed_quotes_and_tuple() {
        let aliases = AliasList::parse_literal(r#"("LA MARTINICA", 'SAN JUAN DE DIOS',)"#).unwrap();
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.names()[1], "SAN JUAN DE DIOS");
    }

    #[test]
    fn test_items_are_trimmed_of_brackets_and_spaces() {
        let aliases = AliasList::parse_literal("['(CENTRO) ', ' [OBREGON]']").unwrap();
        assert_eq!(aliases.names(), &["CENTRO".to_string(), "OBREGON".to_string()]);
    }

    #[test]
    fn test_escaped_quote() {
        let aliases = AliasList::parse_literal(r"['O\'HIGGINS']").unwrap();
        assert_eq!(aliases.names(), &["O'HIGGINS".to_string()]);
    }

    #[test]
    fn test_empty_items_dropped() {
        let aliases = AliasList::parse_literal("['', '  ', 'CENTRO']").unwrap();
        assert_eq!(aliases.names(), &["CENTRO".to_string()]);
        assert_eq!(aliases.dropped_empty(), 2);
        assert!(AliasList::parse_literal("[]").unwrap().is_empty());
        assert_eq!(AliasList::parse_literal("['OBREGON']").unwrap().dropped_empty(), 0);
    }

    #[test]
    fn test_display_joins_names() {
        let aliases = AliasList::new(["CENTRO", "OBREGON"]);
        assert_eq!(aliases.display(), "CENTRO, OBREGON");
    }

    #[test]
    fn test_display_keeps_literal_items() {
        let aliases = AliasList::parse_literal("['(CENTRO)', 'OBREGON ']").unwrap();
        assert_eq!(aliases.display(), "(CENTRO), OBREGON ");
        assert_eq!(aliases.names(), &["CENTRO".to_string(), "OBREGON".to_string()]);
    }

    #[test]
    fn test_serializes_stripped_names() {
        let aliases = AliasList::parse_literal("['(CENTRO)']").unwrap();
        assert_eq!(serde_json::to_string(&aliases).unwrap(), r#"["CENTRO"]"#);
    }

    #[test]
    fn test_malformed_literals() {
        assert!(AliasList::parse_literal("CENTRO").is_err());
        assert!(AliasList::parse_literal("['CENTRO'").is_err());
        assert!(AliasList::parse_literal("[CENTRO]").is_err());
        assert!(AliasList::parse_literal("0").is_err());
    }
}
