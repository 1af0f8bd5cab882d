//! JSON REST handlers for grades.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gradebook_app::ports::GradeRepository;
use gradebook_domain::error::{GradebookError, NotFoundError};
use gradebook_domain::grade::{Grade, GradeDraft};
use gradebook_domain::id::GradeId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing a grade.
///
/// Fields are optional here so that a missing field is reported through the
/// domain validation error instead of a deserialization rejection.
#[derive(Deserialize)]
pub struct GradeRequest {
    pub name: Option<String>,
    pub grade: Option<String>,
}

impl From<GradeRequest> for GradeDraft {
    fn from(req: GradeRequest) -> Self {
        Self {
            name: req.name,
            grade: req.grade,
        }
    }
}

/// Confirmation body returned by the delete endpoint.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Grade>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Grade>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<Grade>),
    /// The body was not a JSON object; the id exists.
    Rejected(JsonRejection),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Rejected(rejection) => rejection.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Grade>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted(Json<MessageBody>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted(json) => json.into_response(),
        }
    }
}

/// A path segment that is not an integer in canonical form cannot name a
/// stored grade.
fn parse_id(raw: &str) -> Result<GradeId, ApiError> {
    GradeId::parse_canonical(raw).ok_or_else(|| {
        ApiError::from(GradebookError::NotFound(NotFoundError {
            entity: "Grade",
            id: raw.to_string(),
        }))
    })
}

/// `GET /grades`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: GradeRepository + Send + Sync + 'static,
{
    let grades = state.grade_service.list_grades().await?;
    Ok(ListResponse::Ok(Json(grades)))
}

/// `GET /grades/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: GradeRepository + Send + Sync + 'static,
{
    let grade_id = parse_id(&id)?;
    let grade = state.grade_service.get_grade(grade_id).await?;
    Ok(GetResponse::Ok(Json(grade)))
}

/// `POST /grades`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    Json(req): Json<GradeRequest>,
) -> Result<CreateResponse, ApiError>
where
    R: GradeRepository + Send + Sync + 'static,
{
    let created = state.grade_service.create_grade(req.into()).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /grades/{id}`
///
/// An unknown id answers 404 even when the body is malformed.
pub async fn update<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<GradeRequest>, JsonRejection>,
) -> Result<UpdateResponse, ApiError>
where
    R: GradeRepository + Send + Sync + 'static,
{
    let grade_id = parse_id(&id)?;
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            state.grade_service.get_grade(grade_id).await?;
            return Ok(UpdateResponse::Rejected(rejection));
        }
    };
    let updated = state
        .grade_service
        .update_grade(grade_id, req.into())
        .await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /grades/{id}`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: GradeRepository + Send + Sync + 'static,
{
    let grade_id = parse_id(&id)?;
    state.grade_service.delete_grade(grade_id).await?;
    Ok(DeleteResponse::Deleted(Json(MessageBody {
        message: format!("Grade with id {grade_id} deleted"),
    })))
}
