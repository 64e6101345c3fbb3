//! Session extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::{AppError, set_sentry_user};
use crate::models::{CurrentUser, SessionContext, session_keys};
use crate::state::AppState;

/// Extractor that requires a logged-in user and resolves their role.
///
/// Rejects with 401 when the session carries no user. Profile lookup
/// failures do not reject; the context just has no elevated capabilities.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireSession(ctx): RequireSession) -> String {
///     format!("Hello, {}!", ctx.display_name())
/// }
/// ```
pub struct RequireSession(pub SessionContext);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AppError::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AppError::Unauthorized)?;

        set_sentry_user(&user.id, Some(user.email.as_str()));
        Ok(Self(state.identity().resolve(user).await))
    }
}

/// Store the logged-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the logged-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
