//! Account endpoints.

use actix_web::{HttpResponse, web};
use blog_core::domain::{Account, Role};
use blog_core::services::{AccountChanges, NewAccount};
use blog_shared::dto::{AccountResponse, CreateAccountRequest, PageQuery, UpdateAccountRequest};

use super::{list_response, page_of, parse_id};
use crate::middleware::auth::Authenticated;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn account_response(account: Account) -> AccountResponse {
    AccountResponse {
        id: account.id.to_string(),
        username: account.username,
        role: account.role.to_string(),
        created_at: account.created_at.to_rfc3339(),
        deleted_at: account.deleted_at.map(|at| at.to_rfc3339()),
    }
}

/// Sign up a new account. The requested role is ignored.
///
/// POST /api/v1/accounts
pub async fn create(
    Authenticated(caller): Authenticated,
    state: web::Data<AppState>,
    body: web::Json<CreateAccountRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    tracing::debug!(caller_id = %caller.id, username = %body.username, "Account signup");

    let account = state
        .accounts
        .create(NewAccount {
            username: body.username,
            password: body.password,
            requested_role: body.role.as_deref().map(Role::from),
        })
        .await?;

    Ok(HttpResponse::Created().json(account_response(account)))
}

/// GET /api/v1/accounts
pub async fn list(
    Authenticated(_caller): Authenticated,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = page_of(&state, query.page, query.limit);
    let (accounts, metadata) = state.accounts.list(page).await?;

    Ok(HttpResponse::Ok().json(list_response(accounts, metadata, account_response)))
}

/// GET /api/v1/accounts/{id}
pub async fn get(
    Authenticated(_caller): Authenticated,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let account = state.accounts.get_by_id(id).await?;

    Ok(HttpResponse::Ok().json(account_response(account)))
}

/// Replace an account. Owner or admin only.
///
/// PUT /api/v1/accounts/{id}
pub async fn update(
    Authenticated(caller): Authenticated,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateAccountRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let body = body.into_inner();

    let account = state
        .accounts
        .update(
            id,
            AccountChanges {
                username: body.username,
                password: body.password,
                role: body.role.as_deref().map(Role::from),
            },
            &caller,
        )
        .await?;

    Ok(HttpResponse::Ok().json(account_response(account)))
}

/// Soft-delete an account. Owner or admin only.
///
/// DELETE /api/v1/accounts/{id}
pub async fn delete(
    Authenticated(caller): Authenticated,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.accounts.delete(id, &caller).await?;

    Ok(HttpResponse::NoContent().finish())
}
