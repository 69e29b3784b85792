use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::{
    database::pool::run_migrations,
    error::{Error, Result},
    AppState,
};

/// Applies migrations and seeds the configured administrator. Safe to call
/// repeatedly.
#[utoipa::path(
    post,
    path = "/init-db",
    responses(
        (status = 200, description = "Schema ready"),
        (status = 400, description = "BOOTSTRAP_ADMIN_PASSWORD is not configured")
    )
)]
#[axum::debug_handler]
pub async fn init_db(State(state): State<AppState>) -> Result<Json<Value>> {
    let Some(password) = state.bootstrap_admin_password.as_deref() else {
        return Err(Error::BadRequest(
            "BOOTSTRAP_ADMIN_PASSWORD is not configured".to_string(),
        ));
    };

    run_migrations(&state.pool).await?;
    let username = state.bootstrap_admin_username.as_str();
    let created = state.user_service.ensure_admin(username, password).await?;
    if created {
        tracing::info!(username, "bootstrap administrator created");
    }

    Ok(Json(json!({
        "status": "ok",
        "admin_created": created,
    })))
}
