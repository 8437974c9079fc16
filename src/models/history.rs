use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Platform;

/// Parameters a search ran with, stored alongside the history row as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub platforms: Vec<Platform>,
    pub timestamp: DateTime<Utc>,
}

/// One recorded image search, as stored in `search_history`.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct SearchHistory {
    /// Unique identifier for the history entry (UUID v4).
    pub id: Uuid,
    /// Owner of the entry.
    pub user_id: i32,
    /// The image the search ran against.
    pub image_url: String,
    /// Stable fingerprint of the image URL.
    pub image_hash: String,
    /// Number of product matches the search produced.
    pub result_count: i32,
    /// Parameters the search ran with.
    pub search_params: Json<SearchParams>,
    /// When the search was recorded.
    pub created_at: DateTime<Utc>,
}

/// A persisted product match, as stored in `search_results`.
///
/// `platform` stays a plain string here: the column is TEXT and the value is
/// written from [`Platform::as_str`], so it re-serializes identically.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct StoredResult {
    pub id: Uuid,
    pub history_id: Uuid,
    pub platform: String,
    pub product_id: String,
    pub title: String,
    pub price: f64,
    /// Coalesced to `price` at persist time when the listing had no
    /// pre-discount price.
    pub original_price: f64,
    pub image_url: String,
    pub product_url: String,
    pub sales: i64,
    pub shop_name: String,
    pub shop_rating: Option<f64>,
    pub similarity_score: i32,
}

/// A history row plus its highest-similarity preview results.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub history: SearchHistory,
    pub results: Vec<StoredResult>,
}

/// Query parameters for listing history.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

impl HistoryQuery {
    /// Resolves the raw query into a usable `(page, page_size)` pair:
    /// page is at least 1, page_size is clamped to 1..=100.
    pub fn sanitized(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, page_size)
    }
}

/// Pagination metadata returned with every history page.
#[derive(Debug, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        Self {
            page,
            page_size,
            total,
            // Ceiling division; page_size is always >= 1 here.
            total_pages: (total + page_size - 1) / page_size,
        }
    }
}

/// Response body for `GET /api/history`.
#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub histories: Vec<HistoryEntry>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = HistoryQuery {
            page: None,
            page_size: None,
        };
        assert_eq!(query.sanitized(), (1, 10));
    }

    #[test]
    fn test_query_clamping() {
        let query = HistoryQuery {
            page: Some(0),
            page_size: Some(0),
        };
        assert_eq!(query.sanitized(), (1, 1));

        let query = HistoryQuery {
            page: Some(-3),
            page_size: Some(4096),
        };
        assert_eq!(query.sanitized(), (1, 100));

        let query = HistoryQuery {
            page: Some(7),
            page_size: Some(25),
        };
        assert_eq!(query.sanitized(), (7, 25));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 1).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(2, 3, 7).total_pages, 3);
    }

    #[test]
    fn test_history_entry_flattens_row_fields() {
        let history = SearchHistory {
            id: Uuid::new_v4(),
            user_id: 1,
            image_url: "https://example.com/shoe.jpg".to_string(),
            image_hash: "aHR0cHM6Ly9leGFtcGxlLmNvbS9zaG9l".to_string(),
            result_count: 0,
            search_params: Json(SearchParams {
                platforms: vec![Platform::Taobao, Platform::Jd],
                timestamp: Utc::now(),
            }),
            created_at: Utc::now(),
        };

        let entry = HistoryEntry {
            history,
            results: vec![],
        };
        let json = serde_json::to_value(&entry).unwrap();

        // Flattened: row fields sit beside `results`, not nested.
        assert!(json.get("image_url").is_some());
        assert!(json.get("history").is_none());
        assert_eq!(json["search_params"]["platforms"][0], "taobao");
        assert_eq!(json["results"], serde_json::json!([]));
    }
}
