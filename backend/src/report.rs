//! # report — Report Exporter
//!
//! Turns a list of [`AnalysisRecord`]s into CSV bytes. Both delivery modes
//! (download and Drive upload) go through [`render_csv`] so they always carry
//! identical content.
//!
//! ```text
//! coin,shortPositionNotes,shortAnalysis,longPositionNotes,longAnalysis
//! BTC,...,sell,...,...
//! ```

use anyhow::Context;
use chrono::NaiveDate;

use crate::{error::AppError, models::AnalysisRecord};

/// Fixed column order.
pub const COLUMNS: [&str; 5] = [
    "coin",
    "shortPositionNotes",
    "shortAnalysis",
    "longPositionNotes",
    "longAnalysis",
];

pub const CSV_MIME: &str = "text/csv";

/// Serialise `records` to CSV with a header row. Empty input is `NoData`.
pub fn render_csv(records: &[AnalysisRecord]) -> Result<Vec<u8>, AppError> {
    if records.is_empty() {
        return Err(AppError::NoData);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS).context("csv header")?;

    for record in records {
        writer
            .write_record([
                record.coin.label(),
                record.short_position_notes.as_str(),
                record.short_analysis.as_str(),
                record.long_position_notes.as_str(),
                record.long_analysis.as_str(),
            ])
            .context("csv row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("csv flush: {}", e.error()))?;
    Ok(bytes)
}

/// `DD.MM.YY.csv` for the given day. Content never influences the name.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("{}.csv", date.format("%d.%m.%y"))
}

/// File name for a report produced right now (server local time).
pub fn todays_file_name() -> String {
    report_file_name(chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::CoinRef;
    use pretty_assertions::assert_eq;

    fn record(name: &str, short_analysis: &str) -> AnalysisRecord {
        AnalysisRecord {
            coin: CoinRef {
                id:     Some(name.to_lowercase()),
                symbol: Some(name.to_lowercase()),
                name:   Some(name.to_string()),
            },
            short_analysis: short_analysis.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_is_no_data() {
        assert!(matches!(render_csv(&[]), Err(AppError::NoData)));
    }

    #[test]
    fn header_plus_one_row_per_record() {
        let bytes = render_csv(&[record("BTC", "sell"), record("ETH", "")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "coin,shortPositionNotes,shortAnalysis,longPositionNotes,longAnalysis"
        );
        assert_eq!(lines[1], "BTC,,sell,,");
        assert_eq!(lines[2], "ETH,,,,");
    }

    #[test]
    fn free_text_is_quoted() {
        let mut r = record("BTC", "");
        r.long_analysis = "break above 70k, then \"retest\"".into();
        r.short_position_notes = "line one\nline two".into();

        let bytes = render_csv(&[r]).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let row = reader.records().next().unwrap().unwrap();

        assert_eq!(&row[1], "line one\nline two");
        assert_eq!(&row[4], "break above 70k, then \"retest\"");
    }

    #[test]
    fn unlabeled_coin_gets_placeholder() {
        let r = AnalysisRecord::default();
        let text = String::from_utf8(render_csv(&[r]).unwrap()).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("Unknown coin,"));
    }

    #[test]
    fn file_name_is_day_month_short_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(report_file_name(date), "07.03.24.csv");
    }
}
