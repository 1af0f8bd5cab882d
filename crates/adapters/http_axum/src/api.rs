//! JSON REST handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod grades;

use axum::Router;
use axum::routing::get;

use gradebook_app::ports::GradeRepository;

use crate::state::AppState;

/// Build the grades sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: GradeRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/grades", get(grades::list::<R>).post(grades::create::<R>))
        .route(
            "/grades/{id}",
            get(grades::get::<R>)
                .put(grades::update::<R>)
                .delete(grades::delete::<R>),
        )
}
