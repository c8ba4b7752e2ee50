//! Per-route guard for staff-only endpoints.

use crate::error::AppError;
use crate::extractors::BasicCredentials;
use crate::service::auth::authenticate;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Authenticated staff account, inserted into request extensions by [`require_staff`].
#[derive(Clone, Debug)]
pub struct StaffUser {
    pub id: i64,
    pub username: String,
}

/// Missing or bad credentials yield 401 with a Basic challenge; a valid non-staff account yields 403.
///
/// Attach with `axum::middleware::from_fn_with_state(state, require_staff)`.
pub async fn require_staff(
    State(state): State<AppState>,
    credentials: BasicCredentials,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(state.store.as_ref(), &credentials.username, &credentials.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!(username = %credentials.username, "rejected credentials");
            AppError::Unauthorized {
                realm: state.auth_realm.to_string(),
            }
        })?;
    if !user.is_staff {
        tracing::warn!(username = %user.username, "non-staff account denied");
        return Err(AppError::Forbidden);
    }
    req.extensions_mut().insert(StaffUser {
        id: user.id,
        username: user.username,
    });
    Ok(next.run(req).await)
}
