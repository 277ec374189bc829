//! HTTP handlers and route configuration.

mod health;
mod post;

use actix_web::web;

/// Configure all application routes under the `/api` prefix.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/post", web::get().to(post::list_posts))
            .route("/post", web::post().to(post::create_post))
            .route("/post/{post_id}", web::get().to(post::get_post))
            .route("/post/{post_id}", web::put().to(post::update_post))
            .route("/post/{post_id}", web::delete().to(post::delete_post)),
    );
}

/// The registered route table, logged at startup.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/api/health"),
    ("GET", "/api/post"),
    ("POST", "/api/post"),
    ("GET", "/api/post/{post_id}"),
    ("PUT", "/api/post/{post_id}"),
    ("DELETE", "/api/post/{post_id}"),
];
