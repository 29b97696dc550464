//! Format-independent cell values

use calamine::Data;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank, error or non-textual cell
    Empty,
    /// Text
    Text(String),
    /// Numeric value
    Number(f64),
}

impl Cell {
    /// Classify a CSV field: blank, numeric or text
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(number) => Cell::Number(number),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }

    /// Text rendering; integral numbers print without a fraction
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.trim().to_string(),
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
        }
    }

    /// Non-negative count; anything unparseable is zero
    pub fn count(&self) -> u64 {
        let value = match self {
            Cell::Empty => return 0,
            Cell::Number(n) => *n,
            Cell::Text(text) => match text.trim().parse::<f64>() {
                Ok(n) => n,
                Err(_) => return 0,
            },
        };
        if value.is_finite() && value > 0.0 {
            value.round() as u64
        } else {
            0
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::from_field(s),
            Data::Bool(b) => Cell::Text(b.to_string()),
            // Dates (FECHA) and error cells carry no counts
            _ => Cell::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_coercion() {
        assert_eq!(Cell::Number(3.0).count(), 3);
        assert_eq!(Cell::Number(2.6).count(), 3);
        assert_eq!(Cell::Text(" 4 ".into()).count(), 4);
        assert_eq!(Cell::Text("n/d".into()).count(), 0);
        assert_eq!(Cell::Number(-1.0).count(), 0);
        assert_eq!(Cell::Number(f64::NAN).count(), 0);
        assert_eq!(Cell::Empty.count(), 0);
    }

    #[test]
    fn test_text_rendering() {
        assert_eq!(Cell::Number(37000.0).text(), "37000");
        assert_eq!(Cell::Text(" Centro ".into()).text(), "Centro");
        assert_eq!(Cell::Empty.text(), "");
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(Cell::from(&Data::Int(5)), Cell::Number(5.0));
        assert_eq!(Cell::from(&Data::String("7".into())), Cell::Number(7.0));
        assert_eq!(Cell::from(&Data::String("CENTRO".into())), Cell::Text("CENTRO".into()));
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
    }
}
