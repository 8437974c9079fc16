use actix_web::{post, web, HttpResponse, Responder};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::catalog::{self, DEFAULT_PLATFORMS};
use crate::error::AppError;
use crate::models::{Platform, ProductMatch, SearchParams};

#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    /// Publicly reachable URL of the query image.
    #[validate(url)]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<ProductMatch>,
    pub total: usize,
    pub platforms: Vec<Platform>,
}

/// Fingerprint stored with each history row so identical image URLs can be
/// recognized later. First 32 chars of the base64 encoding of the URL.
fn image_hash(image_url: &str) -> String {
    let mut encoded = STANDARD.encode(image_url);
    encoded.truncate(32);
    encoded
}

/// Search products by image
///
/// Open to anonymous callers. When the request carries a valid token the
/// search is additionally recorded in the caller's history; a failure to
/// record it is logged and swallowed, never failing the search itself.
#[post("/image")]
pub async fn search_image(
    pool: web::Data<PgPool>,
    user: Option<AuthenticatedUser>,
    search_data: web::Json<SearchRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    search_data.validate()?;

    let platforms = DEFAULT_PLATFORMS.to_vec();
    let results = catalog::search_matches(&platforms);

    if let Some(user) = user {
        let saved = persist_history(
            &pool,
            user.user_id(),
            &search_data.image_url,
            &platforms,
            &results,
        )
        .await;
        if let Err(e) = saved {
            log::warn!(
                "Failed to save search history for user {}: {}",
                user.user_id(),
                e
            );
        }
    }

    Ok(HttpResponse::Ok().json(SearchResponse {
        total: results.len(),
        results,
        platforms,
    }))
}

/// Writes the history row and its result rows in one transaction, so a
/// partial save never appears in listings.
async fn persist_history(
    pool: &PgPool,
    user_id: i32,
    image_url: &str,
    platforms: &[Platform],
    results: &[ProductMatch],
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let params = SearchParams {
        platforms: platforms.to_vec(),
        timestamp: Utc::now(),
    };

    let history_id: Uuid = sqlx::query_scalar(
        "INSERT INTO search_history (user_id, image_url, image_hash, result_count, search_params)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(user_id)
    .bind(image_url)
    .bind(image_hash(image_url))
    .bind(results.len() as i32)
    .bind(sqlx::types::Json(&params))
    .fetch_one(&mut *tx)
    .await?;

    if !results.is_empty() {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO search_results (history_id, platform, product_id, title, price, \
             original_price, image_url, product_url, sales, shop_name, shop_rating, \
             similarity_score) ",
        );
        builder.push_values(results, |mut row, result| {
            row.push_bind(history_id)
                .push_bind(result.platform.as_str())
                .push_bind(&result.product_id)
                .push_bind(&result.title)
                .push_bind(result.price)
                // The column is NOT NULL; listings without a pre-discount
                // price store the current price.
                .push_bind(result.original_price.unwrap_or(result.price))
                .push_bind(&result.image_url)
                .push_bind(&result.product_url)
                .push_bind(result.sales)
                .push_bind(&result.shop_name)
                .push_bind(result.shop_rating)
                .push_bind(result.similarity_score);
        });
        builder.build().execute(&mut *tx).await?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_hash_is_stable_and_capped() {
        let url = "https://example.com/images/red-sneaker-photo.jpg";
        let hash = image_hash(url);

        assert_eq!(hash.len(), 32);
        assert_eq!(hash, image_hash(url));
        // base64 of an https URL always opens with the encoding of "https:".
        assert!(hash.starts_with("aHR0cHM6"));
    }

    #[test]
    fn test_image_hash_short_input() {
        // Shorter than 32 encoded chars stays un-truncated.
        let hash = image_hash("http://a.io/x");
        assert!(hash.len() < 32);
        assert!(!hash.is_empty());
    }
}
