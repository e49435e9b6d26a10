use salvo::{
    Depot, Request, Response, Router, handler,
    http::{StatusCode, header::LOCATION},
    writing::Json,
};
use tracing::debug;

use crate::app::api::{
    PROBLEMS_ROUTE_COMPONENT, PROBLEMS_ROUTE_PREFIX, require_repo, write_repo_error,
};
use estore_db::model::{Problem, ProblemData};

/// GET /api/problems?deviceId=... - List the problem catalog of one device.
///
/// The listing is scoped, never global, so the device reference is checked
/// before the problems are read.
///
/// ## Errors
/// Returns HTTP 400 if deviceId is missing, non-numeric, or names no device
#[handler]
async fn list_problems(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(device_id) = req.query::<i32>("deviceId") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let device = match repo.device_by_id(device_id).await {
        Ok(device) => device,
        Err(err) => {
            write_repo_error(res, &err);
            return;
        }
    };

    if device.is_none() {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    }

    match repo.problems_of_device(device_id).await {
        Ok(problems) => {
            res.status_code(StatusCode::OK);
            res.render(Json(problems));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// GET /`api/problems/{id}` - Look up one problem.
#[handler]
async fn get_problem(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(id) = req.param::<i32>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    match repo.problem_by_id(id).await {
        Ok(Some(problem)) => {
            res.status_code(StatusCode::OK);
            res.render(Json(problem));
        }
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// POST /api/problems/create - Add a problem to a device's catalog.
///
/// ## Errors
/// Returns HTTP 400 if the body does not parse, fails validation, or names
/// a device that does not exist
#[handler]
async fn create_problem(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let data: ProblemData = match req.parse_json().await {
        Ok(data) => data,
        Err(err) => {
            debug!(error = ?err, "Failed to parse create problem request");
            res.status_code(StatusCode::BAD_REQUEST);
            return;
        }
    };

    match repo.add_problem(&data).await {
        Ok(created) => {
            res.status_code(StatusCode::CREATED);
            let location = format!("{PROBLEMS_ROUTE_PREFIX}/{}", created.id);
            if res.add_header(LOCATION, location, true).is_err() {
                tracing::warn!("Failed to add Location header to response");
            }
            res.render(Json(created));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// PUT /`api/problems/update/{id}` - Replace a problem record.
///
/// ## Errors
/// Returns HTTP 400 if the body does not parse, fails validation, names a
/// device that does not exist, or its id disagrees with the path
/// Returns HTTP 404 if no problem has that id
#[handler]
async fn update_problem(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(id) = req.param::<i32>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let problem: Problem = match req.parse_json().await {
        Ok(problem) => problem,
        Err(err) => {
            debug!(error = ?err, "Failed to parse update problem request");
            res.status_code(StatusCode::BAD_REQUEST);
            return;
        }
    };

    if problem.id != id {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    }

    match repo.update_problem(&problem).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(err) => write_repo_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(PROBLEMS_ROUTE_COMPONENT)
        .get(list_problems)
        .push(Router::with_path("create").post(create_problem))
        .push(Router::with_path("update/{id}").put(update_problem))
        .push(Router::with_path("{id}").get(get_problem))
}
