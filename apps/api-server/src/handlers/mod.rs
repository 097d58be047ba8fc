//! HTTP handlers and route configuration.

mod accounts;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;
use blog_core::domain::{ListMetadata, Page};
use blog_shared::{ListMetadataResponse, ListResponse};
use uuid::Uuid;

use crate::middleware::error::{
    AppError, AppResult, json_error_handler, path_error_handler, query_error_handler,
};
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Authenticated routes
            .service(
                web::scope("/v1")
                    .service(
                        web::scope("/accounts")
                            .route("", web::post().to(accounts::create))
                            .route("", web::get().to(accounts::list))
                            .route("/{id}", web::get().to(accounts::get))
                            .route("/{id}", web::put().to(accounts::update))
                            .route("/{id}", web::delete().to(accounts::delete)),
                    )
                    .service(
                        web::scope("/posts")
                            .route("", web::post().to(posts::create))
                            .route("", web::get().to(posts::list))
                            .route("/{id}", web::get().to(posts::get))
                            .route("/{id}", web::put().to(posts::update))
                            .route("/{id}", web::delete().to(posts::delete)),
                    ),
            ),
    );
}

/// Parse a path id, rejecting anything that is not a UUID.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid ID format: {raw}")))
}

/// `page` defaults to 1, `limit` to the configured page size.
fn page_of(state: &AppState, page: Option<i64>, limit: Option<i64>) -> Page {
    Page::new(page.unwrap_or(1), limit.unwrap_or(state.default_page_limit))
}

fn list_response<T, R>(
    records: Vec<T>,
    metadata: ListMetadata,
    render: impl Fn(T) -> R,
) -> ListResponse<R> {
    ListResponse {
        data: records.into_iter().map(render).collect(),
        metadata: ListMetadataResponse {
            total: metadata.total,
            offset: metadata.offset,
            limit: metadata.limit,
        },
    }
}
