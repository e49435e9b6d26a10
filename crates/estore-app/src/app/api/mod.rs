mod customers;
mod devices;
mod healthcheck;
mod jobs;
mod problems;

use std::sync::Arc;

use salvo::{Depot, Response, Router, http::StatusCode, writing::Text};

use crate::repo_handler::get_repo_from_depot;
use estore_service::error::RepoError;
use estore_service::repo::EstoreRepo;

// Re-export route constants from core
pub use estore_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, CUSTOMERS_ROUTE_COMPONENT, CUSTOMERS_ROUTE_PREFIX,
    DEVICES_ROUTE_COMPONENT, DEVICES_ROUTE_PREFIX, JOBS_ROUTE_COMPONENT, JOBS_ROUTE_PREFIX,
    PROBLEMS_ROUTE_COMPONENT, PROBLEMS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router with all entity handlers.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(healthcheck::routes())
        .push(customers::routes())
        .push(devices::routes())
        .push(problems::routes())
        .push(jobs::routes())
}

/// Pulls the repository out of the depot, or writes a 500 and returns `None`
/// when the injection middleware did not run.
pub(crate) fn require_repo(depot: &Depot, res: &mut Response) -> Option<Arc<dyn EstoreRepo>> {
    match get_repo_from_depot(depot) {
        Ok(repo) => Some(repo),
        Err(err) => {
            tracing::error!(error = ?err, "Repository not available in depot");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            None
        }
    }
}

/// Maps a repository failure onto the response. Missing rows become 404 with
/// the entity diagnostic as the body; bad references and failed validation are
/// client errors; anything from the database layer is a server error.
pub(crate) fn write_repo_error(res: &mut Response, err: &RepoError) {
    match err {
        RepoError::NotFound(_) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Text::Plain(err.to_string()));
        }
        RepoError::InvalidReference(reason) | RepoError::Validation(reason) => {
            tracing::debug!(reason = %reason, "Rejecting request");
            res.status_code(StatusCode::BAD_REQUEST);
        }
        RepoError::Db(db_err) => {
            tracing::error!(error = ?db_err, "Repository operation failed");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

#[cfg(test)]
mod test_support;
