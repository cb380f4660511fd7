use crate::domain::models::actor::{Actor, Claims};
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

/// Decodes the access-token cookie into a role-typed [`Actor`].
/// Tokens are minted by the external identity provider and verified against
/// the configured Ed25519 public key; mutating verbs additionally require the
/// CSRF header to match the token's csrf claim.
pub struct AuthActor(pub Actor);

impl<S> FromRequestParts<S> for AuthActor
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts
            .extensions
            .get::<Cookies>()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        let access_token = cookies
            .get("access_token")
            .ok_or(StatusCode::UNAUTHORIZED)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let decoding_key = DecodingKey::from_ed_pem(app_state.config.jwt_public_key.as_bytes())
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&["training-portal"]);

        let token_data = decode::<Claims>(&access_token, &decoding_key, &validation)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let method = &parts.method;
        if method != "GET" && method != "HEAD" && method != "OPTIONS" {
            let csrf_header_val = parts
                .headers
                .get("X-CSRF-Token")
                .ok_or(StatusCode::FORBIDDEN)?
                .to_str()
                .map_err(|_| StatusCode::FORBIDDEN)?;

            if csrf_header_val != token_data.claims.csrf_token {
                return Err(StatusCode::FORBIDDEN);
            }
        }

        let actor = Actor::from_role(&token_data.claims.role, token_data.claims.sub.clone())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Span::current().record("actor_id", actor.id());
        Span::current().record("actor_role", actor.role_name());

        Ok(AuthActor(actor))
    }
}
