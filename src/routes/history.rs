use actix_web::{delete, get, web, HttpResponse, Responder};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{
    HistoryEntry, HistoryPage, HistoryQuery, Pagination, SearchHistory, StoredResult,
};

/// How many results are attached to each history row in listings. The full
/// result set was already returned by the search itself; listings only need
/// enough for a preview card.
const PREVIEW_RESULTS: usize = 3;

/// List the caller's search history
///
/// Newest first, paginated. Each entry carries its top preview results by
/// similarity score.
#[get("")]
pub async fn list_history(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    query: web::Query<HistoryQuery>,
) -> Result<impl Responder, AppError> {
    let (page, page_size) = query.sanitized();
    let offset = (page - 1) * page_size;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM search_history WHERE user_id = $1")
        .bind(user.user_id())
        .fetch_one(&**pool)
        .await?;

    let rows = sqlx::query_as::<_, SearchHistory>(
        "SELECT id, user_id, image_url, image_hash, result_count, search_params, created_at
         FROM search_history
         WHERE user_id = $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(user.user_id())
    .bind(page_size)
    .bind(offset)
    .fetch_all(&**pool)
    .await?;

    // One query for the whole page's previews; rows arrive best-score first,
    // so keeping the first PREVIEW_RESULTS per bucket keeps the top ones.
    let ids: Vec<Uuid> = rows.iter().map(|h| h.id).collect();
    let mut results_by_history: HashMap<Uuid, Vec<StoredResult>> = HashMap::new();
    if !ids.is_empty() {
        let results = sqlx::query_as::<_, StoredResult>(
            "SELECT id, history_id, platform, product_id, title, price, original_price,
                    image_url, product_url, sales, shop_name, shop_rating, similarity_score
             FROM search_results
             WHERE history_id = ANY($1)
             ORDER BY similarity_score DESC",
        )
        .bind(&ids)
        .fetch_all(&**pool)
        .await?;

        for result in results {
            let bucket = results_by_history.entry(result.history_id).or_default();
            if bucket.len() < PREVIEW_RESULTS {
                bucket.push(result);
            }
        }
    }

    let histories: Vec<HistoryEntry> = rows
        .into_iter()
        .map(|history| {
            let results = results_by_history.remove(&history.id).unwrap_or_default();
            HistoryEntry { history, results }
        })
        .collect();

    Ok(HttpResponse::Ok().json(HistoryPage {
        histories,
        pagination: Pagination::new(page, page_size, total),
    }))
}

/// Delete one history entry
///
/// Scoped to the caller: an id owned by someone else looks exactly like a
/// nonexistent one. Result rows go with the entry via cascade.
#[delete("/{id}")]
pub async fn delete_history(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let history_id = path.into_inner();

    let result = sqlx::query("DELETE FROM search_history WHERE id = $1 AND user_id = $2")
        .bind(history_id)
        .bind(user.user_id())
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("History entry not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
