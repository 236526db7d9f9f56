//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod comments;
mod files;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me))
                    .route("/me", web::put().to(auth::update_profile)),
            )
            // Tags
            .service(
                web::scope("/tags")
                    .route("", web::get().to(posts::list_tags))
                    .route("", web::post().to(posts::create_tag))
                    .route("/{id}", web::delete().to(posts::delete_tag)),
            )
            // Posts, comments and attachments
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::detail))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/comments", web::get().to(comments::list))
                    .route("/{id}/comments", web::post().to(comments::create))
                    .route(
                        "/{post_id}/comments/{id}",
                        web::delete().to(comments::delete),
                    )
                    .route("/{id}/files", web::get().to(files::list))
                    .route("/{id}/files/{filename}", web::post().to(files::upload))
                    .route("/{post_id}/files/{id}", web::delete().to(files::delete)),
            )
            .route("/files/{id}", web::get().to(files::download))
            // Admin moderation
            .service(
                web::scope("/admin")
                    .route("/users", web::get().to(admin::list_users))
                    .route("/users/{id}", web::delete().to(admin::delete_user)),
            ),
    );
}
