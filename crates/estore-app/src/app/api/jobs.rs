use salvo::{
    Depot, Request, Response, Router, handler,
    http::{StatusCode, header::LOCATION},
    writing::Json,
};
use tracing::debug;

use crate::app::api::{JOBS_ROUTE_COMPONENT, JOBS_ROUTE_PREFIX, require_repo, write_repo_error};
use estore_db::model::{JobData, JobUpdate};

/// GET /api/jobs - List every job with its attached problems.
#[handler]
async fn list_jobs(depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    match repo.jobs().await {
        Ok(jobs) => {
            res.status_code(StatusCode::OK);
            res.render(Json(jobs));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// GET /`api/jobs/{id}` - Look up one job with its attached problems.
#[handler]
async fn get_job(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(id) = req.param::<i32>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    match repo.job_by_id(id).await {
        Ok(Some(record)) => {
            res.status_code(StatusCode::OK);
            res.render(Json(record));
        }
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// POST /api/jobs/create - Open a job for a customer's device.
///
/// The payload references its customer, device, and problems by id; all of
/// them must exist and the problem list must not be empty.
///
/// ## Errors
/// Returns HTTP 400 if the body does not parse or any reference is invalid
#[handler]
async fn create_job(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let data: JobData = match req.parse_json().await {
        Ok(data) => data,
        Err(err) => {
            debug!(error = ?err, "Failed to parse create job request");
            res.status_code(StatusCode::BAD_REQUEST);
            return;
        }
    };

    match repo.add_job(&data).await {
        Ok(created) => {
            res.status_code(StatusCode::CREATED);
            let location = format!("{JOBS_ROUTE_PREFIX}/{}", created.job.id);
            if res.add_header(LOCATION, location, true).is_err() {
                tracing::warn!("Failed to add Location header to response");
            }
            res.render(Json(created));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// PUT /`api/jobs/update/{id}` - Replace a job, re-attaching its problem set.
///
/// ## Errors
/// Returns HTTP 400 if the body does not parse, any reference is invalid,
/// or its id disagrees with the path
/// Returns HTTP 404 if no job has that id
#[handler]
async fn update_job(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(id) = req.param::<i32>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let payload: JobUpdate = match req.parse_json().await {
        Ok(payload) => payload,
        Err(err) => {
            debug!(error = ?err, "Failed to parse update job request");
            res.status_code(StatusCode::BAD_REQUEST);
            return;
        }
    };

    if payload.id != id {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    }

    match repo.update_job(id, &payload.data).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(err) => write_repo_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(JOBS_ROUTE_COMPONENT)
        .get(list_jobs)
        .push(Router::with_path("create").post(create_job))
        .push(Router::with_path("update/{id}").put(update_job))
        .push(Router::with_path("{id}").get(get_job))
}
