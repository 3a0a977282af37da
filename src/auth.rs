//! Bridge to the external identity provider.
//!
//! The identity provider signs users in on the client and hands it an opaque
//! bearer token alongside the user's subject identifier. This server does not
//! verify the token. It only checks that one is present when configured to,
//! and passes it along in the request extensions as a [BearerToken].

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{AppState, Error};

/// Whether requests to user-scoped routes must carry a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPolicy {
    /// Requests without a token are let through.
    #[default]
    Optional,
    /// Requests without a token are rejected with 401 Unauthorized.
    Required,
}

/// The bearer token the client received from the identity provider.
///
/// Route handlers can use the function argument
/// `Extension(token): Extension<BearerToken>` to receive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// The raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The state needed for the bearer token middleware.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub policy: AuthPolicy,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            policy: state.auth_policy,
        }
    }
}

/// Middleware that extracts the `Authorization: Bearer` header.
///
/// The token is placed into the request extensions when present. When the
/// policy is [AuthPolicy::Required] a request without a token is answered
/// with [Error::MissingBearerToken].
pub async fn bearer_token_guard(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let token =
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(&mut parts, &state).await {
            Ok(TypedHeader(Authorization(bearer))) => Some(BearerToken(bearer.token().to_owned())),
            Err(_) => None,
        };

    match (token, state.policy) {
        (Some(token), _) => {
            parts.extensions.insert(token);
        }
        (None, AuthPolicy::Required) => {
            tracing::warn!("Rejected request to {} without a bearer token.", parts.uri);
            return Error::MissingBearerToken.into_response();
        }
        (None, AuthPolicy::Optional) => {}
    }

    next.run(Request::from_parts(parts, body)).await
}
