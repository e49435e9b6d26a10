//! Shared fixtures for the handler tests.
//!
//! `MemoryRepo` is an in-memory [`EstoreRepo`] that enforces the same
//! validation and reference rules as the diesel-backed implementation, so
//! the handler tests can exercise the full outcome-to-status mapping
//! without a running database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use salvo::{Router, Service};

use crate::repo_handler::RepoHandler;
use estore_db::model::{
    Customer, CustomerData, Device, DeviceData, Job, JobData, JobRecord, Problem, ProblemData,
};
use estore_service::error::{RepoError, RepoResult};
use estore_service::repo::EstoreRepo;
use estore_service::validate;

#[derive(Debug, Default)]
struct State {
    customers: Vec<Customer>,
    devices: Vec<Device>,
    problems: Vec<Problem>,
    jobs: Vec<Job>,
}

#[derive(Clone, Default)]
pub struct MemoryRepo {
    state: Arc<Mutex<State>>,
}

impl MemoryRepo {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn seed_customer(&self, name: &str, phone: &str) -> Customer {
        let mut state = self.lock();
        let customer = Customer {
            id: next_id(state.customers.len()),
            name: name.to_string(),
            phone: phone.to_string(),
            phone_secondary: None,
            email: None,
            address: None,
        };
        state.customers.push(customer.clone());
        customer
    }

    pub fn seed_customer_with_email(&self, name: &str, phone: &str, email: &str) -> Customer {
        let mut state = self.lock();
        let customer = Customer {
            id: next_id(state.customers.len()),
            name: name.to_string(),
            phone: phone.to_string(),
            phone_secondary: None,
            email: Some(email.to_string()),
            address: None,
        };
        state.customers.push(customer.clone());
        customer
    }

    pub fn seed_device(&self, name: &str, device_type: &str) -> Device {
        let mut state = self.lock();
        let device = Device {
            id: next_id(state.devices.len()),
            name: name.to_string(),
            device_type: device_type.to_string(),
        };
        state.devices.push(device.clone());
        device
    }

    pub fn seed_problem(&self, name: &str, price: i64, device_id: i32) -> Problem {
        let mut state = self.lock();
        let problem = Problem {
            id: next_id(state.problems.len()),
            name: name.to_string(),
            price: BigDecimal::from(price),
            device_id,
            job_id: None,
        };
        state.problems.push(problem.clone());
        problem
    }

    pub fn seed_job(&self, customer_id: i32, device_id: i32, problem_ids: &[i32]) -> Job {
        let mut state = self.lock();
        let job = Job {
            id: next_id(state.jobs.len()),
            customer_id,
            device_id,
            receive_time: Utc.with_ymd_and_hms(2025, 8, 20, 10, 0, 0).unwrap(),
            pickup_time: None,
            estimated_pickup_time: None,
            note: None,
            estimated_price: None,
            collected_price: None,
            is_finished: false,
        };
        state.jobs.push(job.clone());
        for problem in &mut state.problems {
            if problem_ids.contains(&problem.id) {
                problem.job_id = Some(job.id);
            }
        }
        job
    }

    pub fn customer_count(&self) -> usize {
        self.lock().customers.len()
    }

    pub fn customer_snapshot(&self, id: i32) -> Option<Customer> {
        self.lock().customers.iter().find(|c| c.id == id).cloned()
    }

    pub fn job_snapshot(&self, id: i32) -> Option<Job> {
        self.lock().jobs.iter().find(|j| j.id == id).cloned()
    }

    pub fn problems_attached_to(&self, job_id: i32) -> Vec<i32> {
        self.lock()
            .problems
            .iter()
            .filter(|p| p.job_id == Some(job_id))
            .map(|p| p.id)
            .collect()
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len).unwrap() + 1
}

fn job_from_data(id: i32, data: &JobData) -> Job {
    Job {
        id,
        customer_id: data.customer_id,
        device_id: data.device_id,
        receive_time: data.receive_time,
        pickup_time: data.pickup_time,
        estimated_pickup_time: data.estimated_pickup_time,
        note: data.note.clone(),
        estimated_price: data.estimated_price.clone(),
        collected_price: data.collected_price.clone(),
        is_finished: data.is_finished,
    }
}

impl State {
    fn check_job_references(&self, data: &JobData) -> RepoResult<()> {
        if !self.customers.iter().any(|c| c.id == data.customer_id) {
            return Err(RepoError::InvalidReference(format!(
                "customer {} does not exist",
                data.customer_id
            )));
        }
        if !self.devices.iter().any(|d| d.id == data.device_id) {
            return Err(RepoError::InvalidReference(format!(
                "device {} does not exist",
                data.device_id
            )));
        }
        for problem_id in &data.problems {
            if !self.problems.iter().any(|p| p.id == *problem_id) {
                return Err(RepoError::InvalidReference(format!(
                    "problem {problem_id} does not exist"
                )));
            }
        }
        Ok(())
    }

    fn attach_problems(&mut self, job_id: i32, problem_ids: &[i32]) {
        for problem in &mut self.problems {
            if problem.job_id == Some(job_id) {
                problem.job_id = None;
            }
            if problem_ids.contains(&problem.id) {
                problem.job_id = Some(job_id);
            }
        }
    }

    fn problems_of_job(&self, job_id: i32) -> Vec<Problem> {
        self.problems
            .iter()
            .filter(|p| p.job_id == Some(job_id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EstoreRepo for MemoryRepo {
    async fn customer_by_id(&self, id: i32) -> RepoResult<Option<Customer>> {
        Ok(self.lock().customers.iter().find(|c| c.id == id).cloned())
    }

    async fn customers(&self) -> RepoResult<Vec<Customer>> {
        Ok(self.lock().customers.clone())
    }

    async fn customers_by_query(&self, query: &str) -> RepoResult<Vec<Customer>> {
        Ok(self
            .lock()
            .customers
            .iter()
            .filter(|c| {
                c.name.contains(query)
                    || c.phone.contains(query)
                    || c.email.as_deref().is_some_and(|e| e.contains(query))
            })
            .cloned()
            .collect())
    }

    async fn add_customer(&self, data: &CustomerData) -> RepoResult<Customer> {
        validate::customer_fields(&data.name, &data.phone)?;
        let mut state = self.lock();
        let customer = Customer {
            id: next_id(state.customers.len()),
            name: data.name.clone(),
            phone: data.phone.clone(),
            phone_secondary: data.phone_secondary.clone(),
            email: data.email.clone(),
            address: data.address.clone(),
        };
        state.customers.push(customer.clone());
        Ok(customer)
    }

    async fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        validate::customer_fields(&customer.name, &customer.phone)?;
        let mut state = self.lock();
        let Some(existing) = state.customers.iter_mut().find(|c| c.id == customer.id) else {
            return Err(RepoError::NotFound("Customer"));
        };
        *existing = customer.clone();
        Ok(())
    }

    async fn device_by_id(&self, id: i32) -> RepoResult<Option<Device>> {
        Ok(self.lock().devices.iter().find(|d| d.id == id).cloned())
    }

    async fn devices(&self) -> RepoResult<Vec<Device>> {
        Ok(self.lock().devices.clone())
    }

    async fn devices_by_name(&self, name: &str) -> RepoResult<Vec<Device>> {
        Ok(self
            .lock()
            .devices
            .iter()
            .filter(|d| d.name.contains(name))
            .cloned()
            .collect())
    }

    async fn devices_by_type(&self, device_type: &str) -> RepoResult<Vec<Device>> {
        Ok(self
            .lock()
            .devices
            .iter()
            .filter(|d| d.device_type == device_type)
            .cloned()
            .collect())
    }

    async fn add_device(&self, data: &DeviceData) -> RepoResult<Device> {
        validate::device_fields(&data.name, &data.device_type)?;
        let mut state = self.lock();
        let device = Device {
            id: next_id(state.devices.len()),
            name: data.name.clone(),
            device_type: data.device_type.clone(),
        };
        state.devices.push(device.clone());
        Ok(device)
    }

    async fn update_device(&self, device: &Device) -> RepoResult<()> {
        validate::device_fields(&device.name, &device.device_type)?;
        let mut state = self.lock();
        let Some(existing) = state.devices.iter_mut().find(|d| d.id == device.id) else {
            return Err(RepoError::NotFound("Device"));
        };
        *existing = device.clone();
        Ok(())
    }

    async fn problem_by_id(&self, id: i32) -> RepoResult<Option<Problem>> {
        Ok(self.lock().problems.iter().find(|p| p.id == id).cloned())
    }

    async fn problems_of_device(&self, device_id: i32) -> RepoResult<Vec<Problem>> {
        Ok(self
            .lock()
            .problems
            .iter()
            .filter(|p| p.device_id == device_id)
            .cloned()
            .collect())
    }

    async fn add_problem(&self, data: &ProblemData) -> RepoResult<Problem> {
        validate::problem_fields(&data.name, &data.price)?;
        let mut state = self.lock();
        if !state.devices.iter().any(|d| d.id == data.device_id) {
            return Err(RepoError::InvalidReference(format!(
                "device {} does not exist",
                data.device_id
            )));
        }
        let problem = Problem {
            id: next_id(state.problems.len()),
            name: data.name.clone(),
            price: data.price.clone(),
            device_id: data.device_id,
            job_id: None,
        };
        state.problems.push(problem.clone());
        Ok(problem)
    }

    async fn update_problem(&self, problem: &Problem) -> RepoResult<()> {
        validate::problem_fields(&problem.name, &problem.price)?;
        let mut state = self.lock();
        // Row existence is checked before the device reference, like the
        // store-backed implementation.
        if !state.problems.iter().any(|p| p.id == problem.id) {
            return Err(RepoError::NotFound("Problem"));
        }
        if !state.devices.iter().any(|d| d.id == problem.device_id) {
            return Err(RepoError::InvalidReference(format!(
                "device {} does not exist",
                problem.device_id
            )));
        }
        if let Some(existing) = state.problems.iter_mut().find(|p| p.id == problem.id) {
            *existing = problem.clone();
        }
        Ok(())
    }

    async fn job_by_id(&self, id: i32) -> RepoResult<Option<JobRecord>> {
        let state = self.lock();
        Ok(state.jobs.iter().find(|j| j.id == id).map(|job| JobRecord {
            job: job.clone(),
            problems: state.problems_of_job(job.id),
        }))
    }

    async fn jobs(&self) -> RepoResult<Vec<JobRecord>> {
        let state = self.lock();
        Ok(state
            .jobs
            .iter()
            .map(|job| JobRecord {
                job: job.clone(),
                problems: state.problems_of_job(job.id),
            })
            .collect())
    }

    async fn add_job(&self, data: &JobData) -> RepoResult<JobRecord> {
        validate::job_problems(&data.problems)?;
        let mut state = self.lock();
        state.check_job_references(data)?;

        let job = job_from_data(next_id(state.jobs.len()), data);
        state.jobs.push(job.clone());
        state.attach_problems(job.id, &data.problems);

        let problems = state.problems_of_job(job.id);
        Ok(JobRecord { job, problems })
    }

    async fn update_job(&self, id: i32, data: &JobData) -> RepoResult<()> {
        validate::job_problems(&data.problems)?;
        let mut state = self.lock();
        if !state.jobs.iter().any(|j| j.id == id) {
            return Err(RepoError::NotFound("Job"));
        }
        state.check_job_references(data)?;

        let replacement = job_from_data(id, data);
        if let Some(existing) = state.jobs.iter_mut().find(|j| j.id == id) {
            *existing = replacement;
        }
        state.attach_problems(id, &data.problems);
        Ok(())
    }
}

/// Builds a full service (injection hoop plus the API router) around the
/// given repository.
pub fn test_service(repo: MemoryRepo) -> Service {
    Service::new(Router::new().hoop(RepoHandler { repo }).push(super::routes()))
}

/// Attaches a JSON body and the matching content type to a test request.
pub fn with_json(
    builder: salvo::test::RequestBuilder,
    payload: &serde_json::Value,
) -> salvo::test::RequestBuilder {
    builder
        .add_header("content-type", "application/json", true)
        .body(payload.to_string().into_bytes())
}

pub async fn body_json(res: &mut salvo::Response) -> serde_json::Value {
    use salvo::test::ResponseExt;
    let bytes = res.take_bytes(None).await.expect("response body");
    serde_json::from_slice(&bytes).expect("response body is valid JSON")
}

pub async fn body_text(res: &mut salvo::Response) -> String {
    use salvo::test::ResponseExt;
    let bytes = res.take_bytes(None).await.expect("response body");
    String::from_utf8(bytes.to_vec()).expect("response body is utf-8")
}
