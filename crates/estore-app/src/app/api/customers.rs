use salvo::{
    Depot, Request, Response, Router, handler,
    http::{StatusCode, header::LOCATION},
    writing::Json,
};
use tracing::debug;

use crate::app::api::{
    CUSTOMERS_ROUTE_COMPONENT, CUSTOMERS_ROUTE_PREFIX, require_repo, write_repo_error,
};
use estore_db::model::{Customer, CustomerData};

/// GET /api/customers - List every customer.
#[handler]
async fn list_customers(depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    match repo.customers().await {
        Ok(customers) => {
            res.status_code(StatusCode::OK);
            res.render(Json(customers));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// GET /`api/customers/{id}` - Look up one customer.
///
/// ## Errors
/// Returns HTTP 400 if the id is missing or not an integer
/// Returns HTTP 404 if no customer has that id
#[handler]
async fn get_customer(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(id) = req.param::<i32>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    match repo.customer_by_id(id).await {
        Ok(Some(customer)) => {
            res.status_code(StatusCode::OK);
            res.render(Json(customer));
        }
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// GET /api/customers/search?query=... - Substring search over name, phone,
/// and email. Without a query this degenerates to the full listing.
#[handler]
async fn search_customers(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let result = match req.query::<String>("query") {
        Some(query) => repo.customers_by_query(&query).await,
        None => repo.customers().await,
    };

    match result {
        Ok(customers) => {
            res.status_code(StatusCode::OK);
            res.render(Json(customers));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// POST /api/customers/create - Create a customer.
///
/// ## Errors
/// Returns HTTP 400 if the body does not parse or fails validation
#[handler]
async fn create_customer(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let data: CustomerData = match req.parse_json().await {
        Ok(data) => data,
        Err(err) => {
            debug!(error = ?err, "Failed to parse create customer request");
            res.status_code(StatusCode::BAD_REQUEST);
            return;
        }
    };

    match repo.add_customer(&data).await {
        Ok(created) => {
            res.status_code(StatusCode::CREATED);
            let location = format!("{CUSTOMERS_ROUTE_PREFIX}/{}", created.id);
            if res.add_header(LOCATION, location, true).is_err() {
                tracing::warn!("Failed to add Location header to response");
            }
            res.render(Json(created));
        }
        Err(err) => write_repo_error(res, &err),
    }
}

/// PUT /`api/customers/update/{id}` - Replace a customer record.
///
/// ## Errors
/// Returns HTTP 400 if the body does not parse, fails validation, or its id
/// disagrees with the path
/// Returns HTTP 404 if no customer has that id
#[handler]
async fn update_customer(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(repo) = require_repo(depot, res) else {
        return;
    };

    let Some(id) = req.param::<i32>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let customer: Customer = match req.parse_json().await {
        Ok(customer) => customer,
        Err(err) => {
            debug!(error = ?err, "Failed to parse update customer request");
            res.status_code(StatusCode::BAD_REQUEST);
            return;
        }
    };

    if customer.id != id {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    }

    match repo.update_customer(&customer).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(err) => write_repo_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CUSTOMERS_ROUTE_COMPONENT)
        .get(list_customers)
        .push(Router::with_path("search").get(search_customers))
        .push(Router::with_path("create").post(create_customer))
        .push(Router::with_path("update/{id}").put(update_customer))
        .push(Router::with_path("{id}").get(get_customer))
}
