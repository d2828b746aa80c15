//! HTTP handlers
//!
//! Author: hephaex@gmail.com

pub mod auth;
pub mod categories;
pub mod health;
pub mod recipes;

use crate::error::AppError;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for paginated listings
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (1-indexed, default 1)
    pub page: Option<String>,

    /// Items per page (default 20)
    pub limit: Option<String>,
}

/// Query parameters for substring search
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Substring to match against names
    pub q: Option<String>,

    /// Page number (1-indexed, default 1)
    pub page: Option<String>,

    /// Items per page (default 20)
    pub limit: Option<String>,
}

/// Validated pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

/// Parse page/limit strings, rejecting non-numeric or non-positive values
///
/// Taken as strings so a bad value produces the API's own 400 message
/// rather than the framework's plain-text rejection.
pub fn parse_pagination(
    page: Option<&str>,
    limit: Option<&str>,
) -> Result<Pagination, AppError> {
    let page = match page.map(str::trim).filter(|p| !p.is_empty()) {
        None => 1,
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| AppError::ValidationFailed("Page number is not valid".to_string()))?,
    };

    let limit = match limit.map(str::trim).filter(|l| !l.is_empty()) {
        None => 20,
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|l| *l >= 1)
            .ok_or_else(|| AppError::ValidationFailed("Limit is not a valid number".to_string()))?,
    };

    Ok(Pagination { page, limit })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p = parse_pagination(None, None).unwrap();
        assert_eq!(p, Pagination { page: 1, limit: 20 });

        let p = parse_pagination(Some(""), Some(" ")).unwrap();
        assert_eq!(p, Pagination { page: 1, limit: 20 });
    }

    #[test]
    fn test_pagination_parses_values() {
        let p = parse_pagination(Some("3"), Some("5")).unwrap();
        assert_eq!(p, Pagination { page: 3, limit: 5 });
    }

    #[test]
    fn test_pagination_rejects_bad_page() {
        for bad in ["abc", "0", "-2", "1.5"] {
            let err = parse_pagination(Some(bad), None).unwrap_err();
            match err {
                AppError::ValidationFailed(msg) => {
                    assert_eq!(msg, "Page number is not valid")
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_pagination_rejects_bad_limit() {
        for bad in ["xyz", "0", "-1"] {
            let err = parse_pagination(None, Some(bad)).unwrap_err();
            match err {
                AppError::ValidationFailed(msg) => {
                    assert_eq!(msg, "Limit is not a valid number")
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
