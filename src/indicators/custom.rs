//! User-supplied custom indicators: `date,value` CSV text.
//!
//! Purpose
//! -------
//! Decode the text of an uploaded indicator file into [`PricePoint`]s so the
//! indicator can join pairwise analyses as a [`Stock`](crate::series::Stock).
//!
//! Key behaviors
//! -------------
//! - The first record is treated as a header, and skipped, when any of its
//!   fields contains the token `date` or `Date` (`Date`, `Trade Date`,
//!   `date_utc`).
//! - Rows whose value does not parse as a finite number are skipped (logged at
//!   `debug`); rows with no value field or an unparseable date are rejected.
//! - Row order is preserved; no sorting or de-duplication happens here.
//!
//! Conventions
//! -----------
//! - Accepted date formats: `%Y-%m-%d`, `%Y/%m/%d`, `%m/%d/%Y`.
//! - Error indices are 1-based line numbers of the offending row.
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::series::PricePoint;

/// Date layouts tried, in order, for each row.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn is_header(record: &StringRecord) -> bool {
    record.iter().any(|field| field.contains("date") || field.contains("Date"))
}

/// Parse `date,value` lines into points, in file order.
///
/// Errors
/// ------
/// - `AnalysisError::MalformedInput { index, .. }` for a row with fewer than
///   two fields, a date in none of [`DATE_FORMATS`], or text the CSV reader
///   cannot decode; `index` is the 1-based line number.
pub fn parse_custom_indicator_csv(text: &str) -> AnalysisResult<Vec<PricePoint>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|err| {
            let line = err.position().map_or(0, |p| p.line() as usize);
            AnalysisError::malformed(line, err.to_string())
        })?;
        let line = record.position().map_or(row + 1, |p| p.line() as usize);
        if row == 0 && is_header(&record) {
            continue;
        }
        if record.len() < 2 {
            return Err(AnalysisError::malformed(line, "expected `date,value`"));
        }
        let date = parse_date(&record[0]).ok_or_else(|| {
            AnalysisError::malformed(line, format!("unrecognized date '{}'", &record[0]))
        })?;
        match record[1].parse::<f64>() {
            Ok(value) if value.is_finite() => points.push(PricePoint::new(date, value)),
            _ => {
                tracing::debug!(line, value = &record[1], "skipping row with non-numeric value");
                skipped += 1;
            }
        }
    }
    tracing::debug!(rows = points.len(), skipped, "parsed custom indicator");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid")
    }

    #[test]
    // Purpose
    // -------
    // Verify header skipping, non-finite value skipping and order
    // preservation.
    //
    // Given
    // -----
    // - A `Date,Value` header, three valid rows, one `n/a` row and one `inf`
    //   row, with the dates out of order.
    //
    // Expect
    // ------
    // - Three points, in file order.
    fn parser_skips_header_and_non_numeric_rows() {
        // Arrange
        let text = "Date,Value\n2024-01-03,1.5\n2024-01-02,n/a\n2024-01-01,-2\n2024-01-05,inf\n2024-01-04, 3.25\n";

        // Act
        let points = parse_custom_indicator_csv(text).expect("well-formed");

        // Assert
        assert_eq!(
            points,
            vec![
                PricePoint::new(ymd(2024, 1, 3), 1.5),
                PricePoint::new(ymd(2024, 1, 1), -2.0),
                PricePoint::new(ymd(2024, 1, 4), 3.25),
            ]
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify headers whose date column only contains the token are skipped.
    //
    // Given
    // -----
    // - `Trade Date,Value` and `date_utc,value` headers over one row each.
    //
    // Expect
    // ------
    // - One point per input, the header never parsed as a date.
    fn parser_skips_headers_containing_date_token() {
        // Arrange
        let spaced = "Trade Date,Value\n2024-01-01,1.5\n";
        let suffixed = "date_utc,value\n2024-01-02,2.5\n";

        // Act
        let spaced_points = parse_custom_indicator_csv(spaced).expect("header skipped");
        let suffixed_points = parse_custom_indicator_csv(suffixed).expect("header skipped");

        // Assert
        assert_eq!(spaced_points, vec![PricePoint::new(ymd(2024, 1, 1), 1.5)]);
        assert_eq!(suffixed_points, vec![PricePoint::new(ymd(2024, 1, 2), 2.5)]);
    }

    #[test]
    // Purpose
    // -------
    // Verify headerless input keeps its first row and alternative date
    // layouts parse.
    fn parser_accepts_headerless_input_and_date_layouts() {
        let text = "2024/02/01,10\n02/02/2024,11\n";

        let points = parse_custom_indicator_csv(text).expect("well-formed");

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, ymd(2024, 2, 1));
        assert_eq!(points[1].date, ymd(2024, 2, 2));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a bad date or a missing value field reports the line number.
    fn parser_rejects_bad_dates_and_missing_fields() {
        let bad_date = parse_custom_indicator_csv("date,value\n2024-01-01,1\nyesterday,2\n");
        let missing = parse_custom_indicator_csv("2024-01-01,1\n2024-01-02\n");

        assert!(matches!(bad_date, Err(AnalysisError::MalformedInput { index: 3, .. })));
        assert!(matches!(missing, Err(AnalysisError::MalformedInput { index: 2, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify empty text parses to no points rather than failing.
    fn parser_accepts_empty_text() {
        assert_eq!(parse_custom_indicator_csv(""), Ok(Vec::new()));
    }
}
