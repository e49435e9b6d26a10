/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const CUSTOMERS_ROUTE_COMPONENT: &str = "customers";
pub const CUSTOMERS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", CUSTOMERS_ROUTE_COMPONENT);

pub const DEVICES_ROUTE_COMPONENT: &str = "devices";
pub const DEVICES_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", DEVICES_ROUTE_COMPONENT);

pub const PROBLEMS_ROUTE_COMPONENT: &str = "problems";
pub const PROBLEMS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", PROBLEMS_ROUTE_COMPONENT);

pub const JOBS_ROUTE_COMPONENT: &str = "jobs";
pub const JOBS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", JOBS_ROUTE_COMPONENT);
