//! Name and postal-code normalization

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Postal code used when a row carries none
pub const UNKNOWN_POSTAL_CODE: &str = "Unknown";

/// Normalize a neighborhood name into a lookup key
///
/// Folds accents (`FORÁNEA` → `FORANEA`), upper-cases, trims and collapses
/// runs of whitespace to a single space.
pub fn normalize_name(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a postal code cell
///
/// Empty and `nan` cells become [`UNKNOWN_POSTAL_CODE`]; integral floats
/// written by spreadsheet exports (`37000.0`) lose their fraction.
pub fn normalize_postal_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return UNKNOWN_POSTAL_CODE.to_string();
    }
    if trimmed.contains('.') {
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.is_finite() && value.fract() == 0.0 {
                return format!("{}", value as i64);
            }
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_folds_accents_and_case() {
        assert_eq!(normalize_name("Zona  Foránea "), "ZONA FORANEA");
        assert_eq!(normalize_name("león\tCentro"), "LEON CENTRO");
    }

    #[test]
    fn test_normalize_name_keeps_enye_base_letter() {
        // Ñ decomposes to N + combining tilde
        assert_eq!(normalize_name("Cañada"), "CANADA");
    }

    #[test]
    fn test_postal_codes() {
        assert_eq!(normalize_postal_code("37000.0"), "37000");
        assert_eq!(normalize_postal_code(" 37100 "), "37100");
        assert_eq!(normalize_postal_code(""), UNKNOWN_POSTAL_CODE);
        assert_eq!(normalize_postal_code("NaN"), UNKNOWN_POSTAL_CODE);
        assert_eq!(normalize_postal_code("S/N"), "S/N");
    }
}
