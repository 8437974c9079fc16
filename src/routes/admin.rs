use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::RecentUser;

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_searches: i64,
    pub total_results: i64,
    pub total_api_calls: i64,
}

#[derive(Debug, Serialize)]
pub struct AdminStatsResponse {
    pub stats: AdminStats,
    pub recent_users: Vec<RecentUser>,
}

/// Admin access rides on the `role` column, not on anything inside the
/// token: revoking a role locks the user out immediately, and a token whose
/// user has since been deleted is rejected outright.
async fn ensure_admin(pool: &PgPool, user_id: i32) -> Result<(), AppError> {
    let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match role.as_deref() {
        Some("admin") => Ok(()),
        Some(_) => Err(AppError::Forbidden("Administrator access required".into())),
        None => Err(AppError::Unauthorized("User no longer exists".into())),
    }
}

/// Dashboard statistics
///
/// Admin only. Returns platform-wide totals and the five newest accounts.
#[get("/stats")]
pub async fn admin_stats(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    ensure_admin(&pool, user.user_id()).await?;

    let users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users").fetch_one(&**pool);
    let searches =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM search_history").fetch_one(&**pool);
    let results =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM search_results").fetch_one(&**pool);
    let api_calls =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM api_logs").fetch_one(&**pool);

    let (total_users, total_searches, total_results, total_api_calls) =
        futures::try_join!(users, searches, results, api_calls)?;

    let recent_users = sqlx::query_as::<_, RecentUser>(
        "SELECT id, email, username, role, created_at
         FROM users
         ORDER BY created_at DESC
         LIMIT 5",
    )
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(AdminStatsResponse {
        stats: AdminStats {
            total_users,
            total_searches,
            total_results,
            total_api_calls,
        },
        recent_users,
    }))
}
