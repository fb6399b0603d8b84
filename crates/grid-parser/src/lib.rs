//! Reader for whitespace-delimited microscopy grid exports.
//!
//! The format is plain UTF-8 text: optional `#` header lines carrying the
//! physical scan size, then one grid row per line. See [`header`] for the
//! recognized markers and [`writer`] for the inverse operation.

pub mod header;
pub mod writer;

use afm_common::{AfmError, AfmResult, Grid, ParseError, ParseResult};
use bytes::Bytes;
use std::path::Path;
use tracing::{debug, instrument};

use header::{HeaderField, COMMENT_MARKER};

pub use writer::write_grid_text;

/// A grid file held in memory together with a label for error messages.
#[derive(Debug, Clone)]
pub struct GridReader {
    data: Bytes,
    source_name: String,
}

impl GridReader {
    pub fn new(data: impl Into<Bytes>, source_name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            source_name: source_name.into(),
        }
    }

    /// Read a grid file from disk, labelled with its file name.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(data, source_name))
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Parse the grid, naming the file in any error.
    pub fn read(&self) -> AfmResult<Grid> {
        parse_grid_file(&self.data).map_err(|e| AfmError::parse(&self.source_name, e))
    }
}

/// Parse raw file bytes into a grid.
pub fn parse_grid_file(data: &[u8]) -> ParseResult<Grid> {
    let text = std::str::from_utf8(data).map_err(|e| ParseError::Encoding(e.to_string()))?;
    parse_grid_text(text)
}

/// Parse grid text.
///
/// Width and height headers are optional; when repeated the last one wins.
/// Blank lines and other comment lines are skipped. Every data token must be
/// a number and all rows must have the same number of columns. Lines may end
/// in `\n`, `\r\n` or a lone `\r`.
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn parse_grid_text(text: &str) -> ParseResult<Grid> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut width = None;
    let mut height = None;
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut line_numbers = Vec::new();

    for (idx, line) in split_lines(text).enumerate() {
        let line_no = idx + 1;

        if let Some(field) = header::classify(line) {
            let value = header::parse_value(line, line_no, field)?;
            match field {
                HeaderField::Width => width = Some(value),
                HeaderField::Height => height = Some(value),
            }
        } else if !line.starts_with(COMMENT_MARKER) && !line.trim().is_empty() {
            rows.push(parse_row(line, line_no)?);
            line_numbers.push(line_no);
        }
    }

    let grid = Grid::from_rows(rows, &line_numbers)?.with_dimensions(width, height);

    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        width = ?width,
        height = ?height,
        "Parsed grid"
    );

    Ok(grid)
}

/// Split on `\n`, `\r\n` and `\r`; `\r\n` counts as one line break.
fn split_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(end) => {
                let line = &rest[..end];
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
                Some(line)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}

fn parse_row(line: &str, line_no: usize) -> ParseResult<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| ParseError::MalformedNumber {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_headers() {
        let text = "# Width: 5.0\n# Height: 2.0\n1 2 3\n4 5 6\n";
        let grid = parse_grid_text(text).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.width_physical, Some(5.0));
        assert_eq!(grid.height_physical, Some(2.0));
        assert_eq!(grid.values(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_last_header_wins() {
        let text = "# Width: 5.0\n# Width: 7.5\n1 2\n";
        assert_eq!(parse_grid_text(text).unwrap().width_physical, Some(7.5));
    }

    #[test]
    fn test_crlf_and_bom() {
        let text = "\u{feff}# Anchura: 3.0\r\n1.5 2.5\r\n\r\n3.5 4.5\r\n";
        let grid = parse_grid_text(text).unwrap();
        assert_eq!(grid.width_physical, Some(3.0));
        assert_eq!(grid.values(), &[1.5, 2.5, 3.5, 4.5]);
    }

    #[test]
    fn test_split_lines_mixed_endings() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\n\rd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("a\n").collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_malformed_reports_line_and_token() {
        let err = parse_grid_text("# Width: 1\n1.0 2.0 3.0\n1.0 abc 3.0\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedNumber {
                line: 3,
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let err = parse_grid_file(&[0x31, 0x20, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ParseError::Encoding(_)));
    }

    #[test]
    fn test_reader_names_file() {
        let reader = GridReader::new(&b"1 2\n3\n"[..], "topo.txt");
        let err = reader.read().unwrap_err();
        assert_eq!(err.code(), "RaggedGrid");
        assert!(err.to_string().starts_with("failed to parse 'topo.txt'"));
    }
}
