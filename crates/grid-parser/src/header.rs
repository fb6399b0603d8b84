//! Header comment lines carrying the physical scan size.
//!
//! The instrument export writes the header in English or Spanish:
//!
//! ```text
//! # Width: 5.0 um        # Anchura: 5.0 um
//! # Height: 5.0 um       # Altura: 5.0 um
//! ```

use afm_common::{ParseError, ParseResult};

/// Comment marker; any other `#` line is ignored.
pub const COMMENT_MARKER: char = '#';

/// Prefixes announcing the scan width.
pub const WIDTH_MARKERS: [&str; 2] = ["# Width:", "# Anchura:"];

/// Prefixes announcing the scan height.
pub const HEIGHT_MARKERS: [&str; 2] = ["# Height:", "# Altura:"];

/// Which dimension a header line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Width,
    Height,
}

impl HeaderField {
    pub fn name(&self) -> &'static str {
        match self {
            HeaderField::Width => "width",
            HeaderField::Height => "height",
        }
    }
}

/// Identify a dimension header. Markers must start the raw line.
pub fn classify(line: &str) -> Option<HeaderField> {
    if WIDTH_MARKERS.iter().any(|m| line.starts_with(m)) {
        Some(HeaderField::Width)
    } else if HEIGHT_MARKERS.iter().any(|m| line.starts_with(m)) {
        Some(HeaderField::Height)
    } else {
        None
    }
}

/// Read the value of a header line: its third whitespace-separated token.
///
/// Anything after the value (usually a unit) is ignored.
pub fn parse_value(line: &str, line_no: usize, field: HeaderField) -> ParseResult<f64> {
    let token = line.split_whitespace().nth(2).ok_or_else(|| ParseError::InvalidHeader {
        line: line_no,
        field: field.name(),
        message: "missing value".to_string(),
    })?;

    token.parse::<f64>().map_err(|_| ParseError::InvalidHeader {
        line: line_no,
        field: field.name(),
        message: format!("'{}' is not a valid number", token),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_both_languages() {
        assert_eq!(classify("# Width: 5.0"), Some(HeaderField::Width));
        assert_eq!(classify("# Anchura: 5.0"), Some(HeaderField::Width));
        assert_eq!(classify("# Height: 2.5"), Some(HeaderField::Height));
        assert_eq!(classify("# Altura: 2.5"), Some(HeaderField::Height));
        assert_eq!(classify("# Channel: Height"), None);
        // markers are exact prefixes of the raw line
        assert_eq!(classify("  # Width: 5.0"), None);
        assert_eq!(classify("#Width: 5.0"), None);
    }

    #[test]
    fn test_parse_value_ignores_unit() {
        assert_eq!(parse_value("# Width: 5.0 um", 1, HeaderField::Width), Ok(5.0));
        assert_eq!(parse_value("# Altura: 1e1", 2, HeaderField::Height), Ok(10.0));
    }

    #[test]
    fn test_parse_value_errors() {
        assert!(matches!(
            parse_value("# Width:", 3, HeaderField::Width),
            Err(ParseError::InvalidHeader { line: 3, field: "width", .. })
        ));
        assert!(matches!(
            parse_value("# Height: tall", 4, HeaderField::Height),
            Err(ParseError::InvalidHeader { line: 4, field: "height", .. })
        ));
    }
}
