//! Authentication extractor - HTTP Basic credentials resolved to an identity.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use base64::{Engine, engine::general_purpose::STANDARD};
use futures::future::LocalBoxFuture;

use blog_core::domain::Identity;
use blog_core::ports::{AuthError, Credentials};

use super::error::AppError;
use crate::state::AppState;

/// Authenticated caller extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(Authenticated(caller): Authenticated) -> impl Responder {
///     format!("Hello, {}!", caller.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticated(pub Identity);

impl FromRequest for Authenticated {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let resolver = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.resolver.clone());
        let credentials = basic_credentials(req);

        Box::pin(async move {
            let Some(resolver) = resolver else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()));
            };

            let identity = resolver.resolve(credentials?).await.map_err(|err| {
                tracing::debug!(error = %err, "Authentication rejected");
                AppError::from(err)
            })?;

            Ok(Authenticated(identity))
        })
    }
}

/// Read `Authorization: Basic <base64(username:password)>`.
///
/// An absent header is `Ok(None)`. The password may itself contain `:`.
pub fn basic_credentials(req: &HttpRequest) -> Result<Option<Credentials>, AuthError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| {
        AuthError::MalformedCredentials("Invalid authorization header".to_string())
    })?;

    let encoded = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("basic") => rest.trim(),
        _ => {
            return Err(AuthError::MalformedCredentials(
                "Expected Basic credentials".to_string(),
            ));
        }
    };

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|e| AuthError::MalformedCredentials(e.to_string()))?;
    let decoded = String::from_utf8(decoded).map_err(|_| {
        AuthError::MalformedCredentials("Credentials are not valid UTF-8".to_string())
    })?;

    let (username, secret) = decoded.split_once(':').ok_or_else(|| {
        AuthError::MalformedCredentials("Expected username:password".to_string())
    })?;

    Ok(Some(Credentials::new(username, secret)))
}
