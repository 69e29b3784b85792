use axum::{
    extract::{Path, State},
    response::{Json, Redirect},
    Extension, Form,
};
use uuid::Uuid;

use crate::{
    dto::resource_dto::RequestStatusForm,
    error::{Error, Result},
    middleware::auth::AuthContext,
    models::{consumer_request::RequestStatus, user::Role},
    services::resource_service::ResourceForm,
    AppState,
};

/// `GET` handler shared by every list-only record type.
pub async fn list_resource<F: ResourceForm>(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<F::Record>>> {
    auth.authorize(F::LIST_ROLES)?;
    let items = state.resource_service.list::<F>().await?;
    Ok(Json(items))
}

/// `POST .../create` handler shared by every list-only record type.
pub async fn create_resource<F: ResourceForm>(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Form(form): Form<F>,
) -> Result<Redirect> {
    auth.authorize(F::CREATE_ROLES)?;
    state.resource_service.create(form, &auth).await?;
    Ok(Redirect::to(F::REDIRECT_PATH))
}

#[utoipa::path(
    post,
    path = "/requests/{id}/status",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 303, description = "Status changed"),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Request not found")
    )
)]
#[axum::debug_handler]
pub async fn update_request_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Form(form): Form<RequestStatusForm>,
) -> Result<Redirect> {
    auth.authorize(&[Role::Manager, Role::Admin])?;
    let status: RequestStatus = form.status.parse().map_err(Error::BadRequest)?;
    state.request_service.set_status(id, status).await?;
    Ok(Redirect::to("/requests"))
}
