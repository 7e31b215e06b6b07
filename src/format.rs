//! Display Formatting
//!
//! Localized rendering of bill dates and statuses for the list view.

use chrono::{Datelike, NaiveDate};

use crate::models::BillStatus;

/// French short month names, indexed by month0
const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Formats an ISO `YYYY-MM-DD` date as e.g. "4 Avr. 04".
///
/// Errors on anything that is not a valid calendar date; callers fall back
/// to the raw string rather than dropping the record.
pub fn format_date(iso: &str) -> Result<String, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d")?;
    let month = MONTHS_FR[date.month0() as usize];
    Ok(format!("{} {}. {:02}", date.day(), month, date.year() % 100))
}

/// Localized label for a bill status
pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_iso_dates_in_french() {
        assert_eq!(format_date("2004-04-04").unwrap(), "4 Avr. 04");
        assert_eq!(format_date("2023-01-01").unwrap(), "1 Jan. 23");
        assert_eq!(format_date("2001-12-31").unwrap(), "31 Déc. 01");
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(format_date("not-a-date").is_err());
        assert!(format_date("2023-13-01").is_err());
        assert!(format_date("2023-02-30").is_err());
        assert!(format_date("").is_err());
    }

    #[test]
    fn status_labels() {
        assert_eq!(format_status(BillStatus::Pending), "En attente");
        assert_eq!(format_status(BillStatus::Accepted), "Accepté");
        assert_eq!(format_status(BillStatus::Refused), "Refusé");
    }
}
