pub mod admin;
pub mod auth;
pub mod debug;
pub mod health;
pub mod history;
pub mod search;
pub mod upload;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(web::scope("/search").service(search::search_image))
    .service(
        web::scope("/history")
            .service(history::list_history)
            .service(history::delete_history),
    )
    .service(web::scope("/admin").service(admin::admin_stats))
    .service(web::scope("/upload").service(upload::upload_image))
    .service(debug::debug_status);
}
