use chrono::NaiveDateTime;
use thiserror::Error;

/// Formats a browser datetime-local input may send, seconds optional.
const DATETIME_LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid 'Date from' format.")]
    InvalidDateFrom,
    #[error("Invalid 'Date to' format.")]
    InvalidDateTo,
}

/// Inclusive timestamp bounds for the readings listing. Bounds are
/// validated, normalized to `YYYY-MM-DD HH:MM[:SS]`, and handed to the
/// database as bind parameters. Values never end up in the SQL text itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRangeFilter {
    date_from: Option<String>,
    date_to: Option<String>,
}

impl DateRangeFilter {
    pub fn new(date_from: Option<&str>, date_to: Option<&str>) -> Result<Self, FilterError> {
        Ok(Self {
            date_from: normalize_bound(date_from).ok_or(FilterError::InvalidDateFrom)?,
            date_to: normalize_bound(date_to).ok_or(FilterError::InvalidDateTo)?,
        })
    }

    pub fn is_active(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// ` WHERE timestamp >= ? AND timestamp <= ?`, trimmed down to however
    /// many bounds are present. Empty when unfiltered.
    pub fn where_sql(&self) -> String {
        let mut clauses: Vec<&str> = Vec::new();
        if self.date_from.is_some() {
            clauses.push("timestamp >= ?");
        }
        if self.date_to.is_some() {
            clauses.push("timestamp <= ?");
        }

        if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        }
    }

    /// Bind values, in placeholder order. The count query and the page
    /// query both use exactly this list.
    pub fn params(&self) -> Vec<&str> {
        self.date_from
            .iter()
            .chain(self.date_to.iter())
            .map(String::as_str)
            .collect()
    }
}

/// An untouched form field arrives as an empty string; treat it as absent.
/// A present value must parse as a datetime-local timestamp, and the `T`
/// separator is swapped for the space the DATETIME column expects.
fn normalize_bound(raw: Option<&str>) -> Option<Option<String>> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Some(None),
    };

    DATETIME_LOCAL_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(raw, format).is_ok())
        .then(|| Some(raw.replacen('T', " ", 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_bounds_means_no_where_clause() {
        let filter = DateRangeFilter::new(None, None).unwrap();
        assert_eq!(filter.where_sql(), "");
        assert!(filter.params().is_empty());
        assert!(!filter.is_active());
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        let filter = DateRangeFilter::new(Some(""), Some("")).unwrap();
        assert_eq!(filter.where_sql(), "");
        assert!(!filter.is_active());
    }

    #[test]
    fn lower_bound_only() {
        let filter = DateRangeFilter::new(Some("2024-11-01T00:00"), None).unwrap();
        assert_eq!(filter.where_sql(), " WHERE timestamp >= ?");
        assert_eq!(filter.params(), vec!["2024-11-01 00:00"]);
    }

    #[test]
    fn upper_bound_only() {
        let filter = DateRangeFilter::new(None, Some("2024-12-31T23:59:59")).unwrap();
        assert_eq!(filter.where_sql(), " WHERE timestamp <= ?");
        assert_eq!(filter.params(), vec!["2024-12-31 23:59:59"]);
    }

    #[test]
    fn both_bounds_are_anded_in_order() {
        let filter =
            DateRangeFilter::new(Some("2024-11-01T00:00"), Some("2024-11-02T12:30")).unwrap();
        assert_eq!(
            filter.where_sql(),
            " WHERE timestamp >= ? AND timestamp <= ?"
        );
        assert_eq!(filter.params(), vec!["2024-11-01 00:00", "2024-11-02 12:30"]);
    }

    #[test]
    fn invalid_from_is_rejected() {
        assert_eq!(
            DateRangeFilter::new(Some("yesterday"), None),
            Err(FilterError::InvalidDateFrom)
        );
    }

    #[test]
    fn invalid_to_is_rejected() {
        assert_eq!(
            DateRangeFilter::new(None, Some("2024-13-45T99:99")),
            Err(FilterError::InvalidDateTo)
        );
    }

    #[test]
    fn injection_attempts_fail_validation() {
        let result = DateRangeFilter::new(Some("2024-11-01T00:00' OR '1'='1"), None);
        assert_eq!(result, Err(FilterError::InvalidDateFrom));
    }

    #[test]
    fn bound_values_never_appear_in_sql_text() {
        let filter = DateRangeFilter::new(Some("2024-11-01T00:00"), None).unwrap();
        assert!(!filter.where_sql().contains("2024"));
    }
}
