//! Identifier of a previously printed fiscal document.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Printed when a closure or document number is out of range.
const NUMBER_FALLBACK: u32 = 9999;

/// Printed when the date has no usable year.
const DATE_FALLBACK: &str = "30-01-20";

/// Unique document identifier, optionally tied to the printer serial number.
///
/// Renders as `CCCC-NNNN-dd-mm-yy[-serial]`.
///
/// ```
/// use chrono::NaiveDate;
/// use scontrino::document::DocumentId;
///
/// let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// let id = DocumentId::new(1, 2, date, Some("99MEY012345"));
/// assert_eq!(id.to_string(), "0001-0002-01-01-00-99MEY012345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    daily_closure: u32,
    number: u32,
    date: Option<NaiveDate>,
    printer_serial: Option<String>,
}

impl DocumentId {
    /// Numbers outside 1..=9999 become 9999; dates with a year of zero or
    /// less fall back to 30-01-20.
    pub fn new(
        daily_closure: u32,
        number: u32,
        date: NaiveDate,
        printer_serial: Option<&str>,
    ) -> Self {
        Self {
            daily_closure: clamp_number(daily_closure),
            number: clamp_number(number),
            date: (date.year() > 0).then_some(date),
            printer_serial: printer_serial.map(str::to_string),
        }
    }

    pub fn daily_closure(&self) -> u32 {
        self.daily_closure
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

fn clamp_number(n: u32) -> u32 {
    if (1..=9999).contains(&n) {
        n
    } else {
        NUMBER_FALLBACK
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:04}-", self.daily_closure, self.number)?;
        match self.date {
            Some(date) => write!(f, "{}", date.format("%d-%m-%y"))?,
            None => f.write_str(DATE_FALLBACK)?,
        }
        if let Some(serial) = &self.printer_serial {
            write!(f, "-{}", serial)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format() {
        let id = DocumentId::new(12, 23, date(2018, 1, 1), None);
        assert_eq!(id.to_string(), "0012-0023-01-01-18");

        let id = DocumentId::new(1, 2, date(2024, 12, 25), Some("SN1"));
        assert_eq!(id.to_string(), "0001-0002-25-12-24-SN1");
    }

    #[test]
    fn test_numbers_out_of_range() {
        let id = DocumentId::new(0, 10_000, date(2018, 1, 1), None);
        assert_eq!(id.to_string(), "9999-9999-01-01-18");
        assert_eq!(id.daily_closure(), 9999);

        let id = DocumentId::new(9999, 1, date(2018, 1, 1), None);
        assert_eq!(id.to_string(), "9999-0001-01-01-18");
    }

    #[test]
    fn test_date_fallback() {
        let id = DocumentId::new(5, 6, date(0, 3, 4), None);
        assert_eq!(id.to_string(), "0005-0006-30-01-20");

        let id = DocumentId::new(5, 6, date(-10, 3, 4), Some("X"));
        assert_eq!(id.to_string(), "0005-0006-30-01-20-X");
    }
}
