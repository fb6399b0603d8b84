//! Error types for grid parsing and surface rendering.

use thiserror::Error;

use crate::grid::GridShape;

/// Result type alias for grid parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for surface rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type alias using AfmError.
pub type AfmResult<T> = Result<T, AfmError>;

/// Errors raised while reading a whitespace-delimited grid file.
///
/// Line numbers are 1-based and refer to the raw text, headers and
/// comments included.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: '{token}' is not a valid number")]
    MalformedNumber { line: usize, token: String },

    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedGrid {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {field} header: {message}")]
    InvalidHeader {
        line: usize,
        field: &'static str,
        message: String,
    },

    #[error("file contains no data rows")]
    NoData,

    #[error("file is not valid UTF-8 text: {0}")]
    Encoding(String),
}

/// Errors raised while building a surface plot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("overlay grid is {overlay} but topography grid is {topography}")]
    ShapeMismatch {
        topography: GridShape,
        overlay: GridShape,
    },

    #[error("invalid clip range [{min}, {max}]")]
    InvalidClipRange { min: f64, max: f64 },

    #[error("unit factor must be finite and non-zero, got {0}")]
    InvalidUnitFactor(f64),

    #[error("grid has no samples")]
    EmptyGrid,

    #[error("preview encoding failed: {0}")]
    Encoding(String),
}

/// Errors raised while loading channel preset overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read preset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse preset file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown channel '{0}'")]
    UnknownChannel(String),

    #[error("invalid preset for '{channel}': {message}")]
    InvalidPreset { channel: String, message: String },
}

/// Primary error type surfaced to callers.
#[derive(Debug, Error)]
pub enum AfmError {
    /// Parsing failed; `source_name` identifies the offending file.
    #[error("failed to parse '{source_name}': {source}")]
    Parse {
        source_name: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AfmError {
    /// Attach the file name to a parse error.
    pub fn parse(source_name: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            source,
        }
    }

    /// Short stable code for the error kind, suitable for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            AfmError::Parse { source, .. } => match source {
                ParseError::MalformedNumber { .. } => "MalformedNumber",
                ParseError::RaggedGrid { .. } => "RaggedGrid",
                ParseError::InvalidHeader { .. } => "InvalidHeader",
                ParseError::NoData => "NoData",
                ParseError::Encoding(_) => "Encoding",
            },
            AfmError::Render(RenderError::ShapeMismatch { .. }) => "ShapeMismatch",
            AfmError::Render(_) => "RenderError",
            AfmError::Config(_) => "ConfigError",
        }
    }
}
