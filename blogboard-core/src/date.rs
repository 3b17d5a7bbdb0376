use chrono::{NaiveDate, Utc};

const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Current calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// `YYYY-MM-DD` to `DD/MM/YYYY`. Returns `None` for anything else.
pub fn display_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), ISO_FORMAT)
        .ok()
        .map(|date| date.format(DISPLAY_FORMAT).to_string())
}
