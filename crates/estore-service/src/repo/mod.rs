pub mod diesel_repo;

pub use diesel_repo::DieselRepo;

use async_trait::async_trait;

use estore_db::model::{
    Customer, CustomerData, Device, DeviceData, JobData, JobRecord, Problem, ProblemData,
};

use crate::error::RepoResult;

/// Data access contract for the repair-shop entities.
///
/// One method per read or mutation the HTTP layer needs. Point lookups
/// return `Ok(None)` on a miss and searches return an empty vec; only
/// mutations fail with `NotFound`/`InvalidReference` outcomes. Cross-entity
/// invariants (a problem's device, a job's customer, device, and non-empty
/// problem set) are enforced here, not assumed from input.
#[async_trait]
pub trait EstoreRepo: Send + Sync {
    // customer operations

    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn customer_by_id(&self, id: i32) -> RepoResult<Option<Customer>>;
    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn customers(&self) -> RepoResult<Vec<Customer>>;
    /// Case-sensitive substring match against name, primary phone, or email.
    ///
    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn customers_by_query(&self, query: &str) -> RepoResult<Vec<Customer>>;
    /// ## Errors
    /// Returns `RepoError::Validation` when a required field is empty and
    /// `RepoError::Db` when the store cannot be written.
    async fn add_customer(&self, data: &CustomerData) -> RepoResult<Customer>;
    /// ## Errors
    /// Returns `RepoError::NotFound` when no row has the customer's id,
    /// `RepoError::Validation` when a required field is empty, and
    /// `RepoError::Db` when the store cannot be written.
    async fn update_customer(&self, customer: &Customer) -> RepoResult<()>;

    // device operations

    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn device_by_id(&self, id: i32) -> RepoResult<Option<Device>>;
    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn devices(&self) -> RepoResult<Vec<Device>>;
    /// Substring match on name.
    ///
    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn devices_by_name(&self, name: &str) -> RepoResult<Vec<Device>>;
    /// Exact match on type.
    ///
    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn devices_by_type(&self, device_type: &str) -> RepoResult<Vec<Device>>;
    /// ## Errors
    /// Returns `RepoError::Validation` when a required field is empty and
    /// `RepoError::Db` when the store cannot be written.
    async fn add_device(&self, data: &DeviceData) -> RepoResult<Device>;
    /// ## Errors
    /// Returns `RepoError::NotFound` when no row has the device's id,
    /// `RepoError::Validation` when a required field is empty, and
    /// `RepoError::Db` when the store cannot be written.
    async fn update_device(&self, device: &Device) -> RepoResult<()>;

    // problem operations

    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn problem_by_id(&self, id: i32) -> RepoResult<Option<Problem>>;
    /// All problems scoped to a device. Does not check that the device
    /// exists; the handler pre-checks on this read path.
    ///
    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn problems_of_device(&self, device_id: i32) -> RepoResult<Vec<Problem>>;
    /// ## Errors
    /// Returns `RepoError::Validation` on a bad field,
    /// `RepoError::InvalidReference` when the named device does not exist,
    /// and `RepoError::Db` when the store cannot be written.
    async fn add_problem(&self, data: &ProblemData) -> RepoResult<Problem>;
    /// ## Errors
    /// Returns `RepoError::NotFound` when no row has the problem's id,
    /// `RepoError::Validation` on a bad field, `RepoError::InvalidReference`
    /// when the named device does not exist, and `RepoError::Db` when the
    /// store cannot be written.
    async fn update_problem(&self, problem: &Problem) -> RepoResult<()>;

    // job operations

    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn job_by_id(&self, id: i32) -> RepoResult<Option<JobRecord>>;
    /// ## Errors
    /// Returns `RepoError::Db` when the store cannot be read.
    async fn jobs(&self) -> RepoResult<Vec<JobRecord>>;
    /// ## Errors
    /// Returns `RepoError::InvalidReference` when the customer, device, or
    /// any problem does not exist or the problem set is empty, and
    /// `RepoError::Db` when the store cannot be written.
    async fn add_job(&self, data: &JobData) -> RepoResult<JobRecord>;
    /// ## Errors
    /// Returns `RepoError::NotFound` when no job has the given id,
    /// `RepoError::InvalidReference` on a missing customer, device, or
    /// problem or an empty problem set, and `RepoError::Db` when the store
    /// cannot be written.
    async fn update_job(&self, id: i32, data: &JobData) -> RepoResult<()>;
}
