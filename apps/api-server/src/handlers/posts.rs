//! Post endpoints.

use actix_web::{HttpResponse, web};
use blog_core::domain::Post;
use blog_core::services::{NewPost, PostChanges, PostCriteria};
use blog_shared::dto::{AuthorResponse, PostListQuery, PostRequest, PostResponse};

use super::{list_response, page_of, parse_id};
use crate::middleware::auth::Authenticated;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        content: post.content,
        author: AuthorResponse {
            id: post.author.id.to_string(),
            username: post.author.username,
        },
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
        deleted_at: post.deleted_at.map(|at| at.to_rfc3339()),
    }
}

/// Publish a post as the caller.
///
/// POST /api/v1/posts
pub async fn create(
    Authenticated(caller): Authenticated,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let post = state
        .posts
        .create(
            NewPost {
                title: body.title,
                content: body.content,
            },
            &caller,
        )
        .await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// List live posts, optionally by author username and creation day.
///
/// GET /api/v1/posts?username=&date=YYYY-MM-DD&page=&limit=
pub async fn list(
    Authenticated(_caller): Authenticated,
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = page_of(&state, query.page, query.limit);
    let criteria = PostCriteria {
        author_username: query.username,
        date: query.date,
    };

    let (posts, metadata) = state.posts.list(criteria, page).await?;

    Ok(HttpResponse::Ok().json(list_response(posts, metadata, post_response)))
}

/// GET /api/v1/posts/{id}
pub async fn get(
    Authenticated(_caller): Authenticated,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.get_by_id(id).await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// Replace a post's title and content. Owner or admin only.
///
/// PUT /api/v1/posts/{id}
pub async fn update(
    Authenticated(caller): Authenticated,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let body = body.into_inner();

    let post = state
        .posts
        .update(
            id,
            PostChanges {
                title: body.title,
                content: body.content,
            },
            &caller,
        )
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    Authenticated(caller): Authenticated,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.posts.delete(id, &caller).await?;

    Ok(HttpResponse::NoContent().finish())
}
