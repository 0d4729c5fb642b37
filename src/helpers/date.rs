//! Date helper functions

use chrono::{DateTime, Datelike, Utc};

/// Abbreviated month names for the pt-BR display locale
const MONTHS_PT_BR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Placeholder shown for posts without a publication date
pub const UNPUBLISHED_LABEL: &str = "não publicado";

/// Format a date as `dd MMM yyyy` in pt-BR
///
/// # Examples
/// ```ignore
/// format_pt_br(&date) // -> "19 mai 2021"
/// ```
pub fn format_pt_br(date: &DateTime<Utc>) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}

/// Format an optional publication date for display
///
/// A missing date renders the explicit unpublished placeholder instead
/// of failing.
pub fn format_publication_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(d) => format_pt_br(d),
        None => UNPUBLISHED_LABEL.to_string(),
    }
}

/// Format a date in ISO 8601 for `<time datetime="...">` attributes
pub fn date_attribute(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%dT%H:%M:%S%:z").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_pt_br() {
        let date = Utc.with_ymd_and_hms(2021, 5, 19, 12, 0, 0).unwrap();
        assert_eq!(format_pt_br(&date), "19 mai 2021");
    }

    #[test]
    fn test_format_pt_br_pads_day() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(format_pt_br(&date), "05 jan 2024");
    }

    #[test]
    fn test_format_publication_date_missing() {
        assert_eq!(format_publication_date(None), "não publicado");
    }

    #[test]
    fn test_date_attribute() {
        let date = Utc.with_ymd_and_hms(2021, 5, 19, 12, 0, 0).unwrap();
        assert_eq!(date_attribute(Some(&date)), "2021-05-19T12:00:00+00:00");
        assert_eq!(date_attribute(None), "");
    }
}
