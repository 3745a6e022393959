use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::warn;

use crate::auth::password::verify_password;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

/// Resolves the Basic-auth credentials of a request to a stored user.
///
/// Every rejection path returns the same opaque 401 so the response never
/// reveals whether the header, the email, or the password was wrong.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::AccessDenied)?;

        let (email, password) = decode_basic(header).ok_or_else(|| {
            warn!("malformed Basic authorization header");
            ApiError::AccessDenied
        })?;

        let user = User::find_by_email(&state.db, &email)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                warn!("authentication failed");
                ApiError::AccessDenied
            })?;

        match verify_password(&password, &user.password_hash) {
            Ok(true) => Ok(AuthUser(user)),
            _ => {
                warn!(user_id = %user.id, "authentication failed");
                Err(ApiError::AccessDenied)
            }
        }
    }
}

/// Splits `Basic <b64(email:password)>` into its credential pair.
fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (email, password) = text.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(creds: &str) -> String {
        format!("Basic {}", STANDARD.encode(creds))
    }

    #[test]
    fn decodes_valid_credentials() {
        let (email, password) = decode_basic(&encode("joe@smith.com:joepassword")).unwrap();
        assert_eq!(email, "joe@smith.com");
        assert_eq!(password, "joepassword");
    }

    #[test]
    fn password_may_contain_colons() {
        let (email, password) = decode_basic(&encode("a@b.com:p:a:s:s")).unwrap();
        assert_eq!(email, "a@b.com");
        assert_eq!(password, "p:a:s:s");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(decode_basic("Bearer abcdef").is_none());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(decode_basic("Basic not-base64!!!").is_none());
    }

    #[test]
    fn rejects_credentials_without_separator() {
        assert!(decode_basic(&encode("no-colon-here")).is_none());
    }
}
