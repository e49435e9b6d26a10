use salvo::{
    Depot, Request, Response, Router, handler,
    http::{StatusCode, header::LOCATION},
    writing::Json,
};
use tracing::debug;

use crate::app::api::{
    DEVICES_ROUTE_COMPONENT, DEVICES_ROUTE_PREFIX, require_repo, write_repo_error,
};
use estore_db::model::{Device, DeviceData};

/// GET /api/devices - List every device model.
#[handler]
async fn list_devices(depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    match repo.devices().await {
        Ok(devices) => {
            res.status_code(StatusCode::OK);
            res.render(Json(devices));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// GET /`api/devices/{id}` - Look up one device.
#[handler]
async fn get_device(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(id) = req.param::<i32>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    match repo.device_by_id(id).await {
        Ok(Some(device)) => {
            res.status_code(StatusCode::OK);
            res.render(Json(device));
        }
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// GET /api/devices/searchName?name=... - Substring match on device name.
///
/// ## Errors
/// Returns HTTP 400 if the name parameter is missing
#[handler]
async fn search_devices_by_name(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(name) = req.query::<String>("name") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    match repo.devices_by_name(&name).await {
        Ok(devices) => {
            res.status_code(StatusCode::OK);
            res.render(Json(devices));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// GET /api/devices/searchType?type=... - Exact match on device type.
///
/// ## Errors
/// Returns HTTP 400 if the type parameter is missing
#[handler]
async fn search_devices_by_type(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(device_type) = req.query::<String>("type") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    match repo.devices_by_type(&device_type).await {
        Ok(devices) => {
            res.status_code(StatusCode::OK);
            res.render(Json(devices));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// POST /api/devices/create - Create a device model.
#[handler]
async fn create_device(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let data: DeviceData = match req.parse_json().await {
        Ok(data) => data,
        Err(err) => {
            debug!(error = ?err, "Failed to parse create device request");
            res.status_code(StatusCode::BAD_REQUEST);
            return;
        }
    };

    match repo.add_device(&data).await {
        Ok(created) => {
            res.status_code(StatusCode::CREATED);
            let location = format!("{DEVICES_ROUTE_PREFIX}/{}", created.id);
            if res.add_header(LOCATION, location, true).is_err() {
                tracing::warn!("Failed to add Location header to response");
            }
            res.render(Json(created));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// PUT /`api/devices/update/{id}` - Replace a device record.
///
/// ## Errors
/// Returns HTTP 400 if the body does not parse, fails validation, or its id
/// disagrees with the path
/// Returns HTTP 404 if no device has that id
#[handler]
async fn update_device(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(id) = req.param::<i32>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let device: Device = match req.parse_json().await {
        Ok(device) => device,
        Err(err) => {
            debug!(error = ?err, "Failed to parse update device request");
            res.status_code(StatusCode::BAD_REQUEST);
            return;
        }
    };

    if device.id != id {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    }

    match repo.update_device(&device).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(err) => write_repo_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(DEVICES_ROUTE_COMPONENT)
        .get(list_devices)
        .push(Router::with_path("searchName").get(search_devices_by_name))
        .push(Router::with_path("searchType").get(search_devices_by_type))
        .push(Router::with_path("create").post(create_device))
        .push(Router::with_path("update/{id}").put(update_device))
        .push(Router::with_path("{id}").get(get_device))
}
