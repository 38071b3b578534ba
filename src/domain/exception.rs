//! Exception log domain model and console form inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// One row of the gateway exception table.
///
/// Rows are written by the gateway itself; the console only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExceptionLog {
    pub id: i64,
    pub key: String,
    pub msg: String,
    pub create_time: DateTime<Utc>,
}

/// Posted filter and paging parameters for the exception list.
///
/// Field names follow the console's form conventions. Zero means "not
/// chosen" for both paging fields and takes the server-side default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(rename = "Key", default)]
    #[validate(length(max = 128, message = "key must be at most 128 characters"))]
    pub key: Option<String>,
    #[serde(rename = "PageSize", default)]
    #[validate(range(min = 0, max = 1000, message = "page size is out of range"))]
    pub page_size: i64,
    #[serde(rename = "PageId", default)]
    #[validate(range(min = 0, max = 1_000_000, message = "page id is out of range"))]
    pub page_id: i64,
}

impl PageQuery {
    /// Key filter normalized for querying: trimmed-empty becomes no filter
    pub fn key_filter(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// Console login form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[serde(rename = "UserName")]
    #[validate(length(min = 1, message = "user name is required"))]
    pub user_name: String,
    #[serde(rename = "Password")]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_binds_form_field_names() {
        let query: PageQuery =
            serde_json::from_str(r#"{"Key": "timeout", "PageSize": 20, "PageId": 3}"#).unwrap();
        assert_eq!(query.key.as_deref(), Some("timeout"));
        assert_eq!(query.page_size, 20);
        assert_eq!(query.page_id, 3);
    }

    #[test]
    fn test_page_query_missing_fields_default_to_zero() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.key, None);
        assert_eq!(query.page_size, 0);
        assert_eq!(query.page_id, 0);
    }

    #[test]
    fn test_page_query_rejects_negative_page_id() {
        let query = PageQuery {
            key: None,
            page_size: 10,
            page_id: -1,
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_page_query_rejects_oversized_page() {
        let query = PageQuery {
            key: None,
            page_size: 5000,
            page_id: 1,
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_page_query_rejects_oversized_page_id() {
        let query = PageQuery {
            key: None,
            page_size: 10,
            page_id: i64::MAX,
        };
        assert!(query.validate().is_err());

        let query = PageQuery {
            key: None,
            page_size: 10,
            page_id: 1_000_000,
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_page_query_accepts_zero_bounds() {
        let query = PageQuery::default();
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_key_filter_drops_blank_keys() {
        let mut query = PageQuery::default();
        assert_eq!(query.key_filter(), None);

        query.key = Some("  ".to_string());
        assert_eq!(query.key_filter(), None);

        query.key = Some("timeout".to_string());
        assert_eq!(query.key_filter(), Some("timeout"));
    }

    #[test]
    fn test_login_input_requires_both_fields() {
        let input = LoginInput {
            user_name: "admin".to_string(),
            password: String::new(),
        };
        assert!(input.validate().is_err());

        let input = LoginInput {
            user_name: "admin".to_string(),
            password: "secret".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_exception_log_serializes_row_fields() {
        let row = ExceptionLog {
            id: 42,
            key: "order/submit".to_string(),
            msg: "upstream timed out".to_string(),
            create_time: Utc::now(),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"id\":42"));
        assert!(json.contains("\"msg\":\"upstream timed out\""));
    }
}
