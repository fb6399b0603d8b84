//! Grid file texts covering the export variants seen in practice.

/// 2x3 scan with English headers.
pub const ENGLISH_HEADERS: &str = "\
# Width: 5.0 um
# Height: 2.5 um
# Channel: Height Sensor
1.0e-9 2.0e-9 3.0e-9
4.0e-9 5.0e-9 6.0e-9
";

/// The same scan exported with Spanish headers.
pub const SPANISH_HEADERS: &str = "\
# Anchura: 5.0 um
# Altura: 2.5 um
# Canal: Sensor de altura
1.0e-9 2.0e-9 3.0e-9
4.0e-9 5.0e-9 6.0e-9
";

/// The same values without any dimension header.
pub const NO_HEADERS: &str = "\
1.0e-9 2.0e-9 3.0e-9

4.0e-9 5.0e-9 6.0e-9
";

/// A data row with a non-numeric token on line 3.
pub const MALFORMED_ROW: &str = "\
# Width: 1.0
1.0 2.0 3.0
1.0 abc 3.0
";

/// Rows of 2 then 3 columns.
pub const RAGGED_ROWS: &str = "\
1.0 2.0
1.0 2.0 3.0
";

/// Only comments: no data rows at all.
pub const HEADERS_ONLY: &str = "\
# Width: 5.0
# Height: 5.0
";

/// Expected values of the 2x3 fixtures, row-major.
pub const FIXTURE_VALUES: [f64; 6] = [1.0e-9, 2.0e-9, 3.0e-9, 4.0e-9, 5.0e-9, 6.0e-9];
