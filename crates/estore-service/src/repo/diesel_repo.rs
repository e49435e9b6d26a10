//! Postgres implementation of the repository contract.
//!
//! Reads are single statements. Mutations that validate references run
//! check-then-write inside one transaction, so a failed check never leaves
//! a partial write behind.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use estore_db::db::connection::{DbConnection, DbPool};
use estore_db::db::{query, schema};
use estore_db::model::{
    Customer, CustomerData, Device, DeviceData, Job, JobData, JobRecord, Problem, ProblemData,
};

use crate::error::{RepoError, RepoResult};
use crate::repo::EstoreRepo;
use crate::validate;

/// Diesel-backed repository over a shared connection pool. The pool is the
/// only state; every operation re-reads what it needs from the store.
#[derive(Clone)]
pub struct DieselRepo {
    pool: DbPool,
}

impl DieselRepo {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn ensure_customer_exists(conn: &mut DbConnection<'_>, customer_id: i32) -> RepoResult<()> {
    let customer: Option<Customer> = query::customer::by_id(customer_id)
        .first(conn)
        .await
        .optional()?;
    if customer.is_none() {
        return Err(RepoError::InvalidReference(format!(
            "customer {customer_id} does not exist"
        )));
    }
    Ok(())
}

async fn ensure_device_exists(conn: &mut DbConnection<'_>, device_id: i32) -> RepoResult<()> {
    let device: Option<Device> = query::device::by_id(device_id)
        .first(conn)
        .await
        .optional()?;
    if device.is_none() {
        return Err(RepoError::InvalidReference(format!(
            "device {device_id} does not exist"
        )));
    }
    Ok(())
}

/// Points the named problem rows at `job_id` and returns the attached set.
/// Every referenced id must resolve to an existing problem row.
async fn attach_problems(
    conn: &mut DbConnection<'_>,
    job_id: i32,
    problem_ids: &[i32],
) -> RepoResult<Vec<Problem>> {
    let distinct: BTreeSet<i32> = problem_ids.iter().copied().collect();
    let found: Vec<Problem> = query::problem::by_ids(problem_ids).load(conn).await?;
    if found.len() != distinct.len() {
        return Err(RepoError::InvalidReference(
            "one or more referenced problems do not exist".to_string(),
        ));
    }

    diesel::update(schema::problem::table.filter(schema::problem::id.eq_any(problem_ids.to_vec())))
        .set(schema::problem::job_id.eq(job_id))
        .execute(conn)
        .await?;

    query::problem::attached_to_job(job_id)
        .load(conn)
        .await
        .map_err(RepoError::from)
}

#[async_trait]
impl EstoreRepo for DieselRepo {
    async fn customer_by_id(&self, id: i32) -> RepoResult<Option<Customer>> {
        let mut conn = self.pool.get().await?;
        let customer = query::customer::by_id(id)
            .first(&mut conn)
            .await
            .optional()?;
        Ok(customer)
    }

    async fn customers(&self) -> RepoResult<Vec<Customer>> {
        let mut conn = self.pool.get().await?;
        Ok(query::customer::all().load(&mut conn).await?)
    }

    async fn customers_by_query(&self, query_text: &str) -> RepoResult<Vec<Customer>> {
        let mut conn = self.pool.get().await?;
        Ok(query::customer::by_query(query_text)
            .load(&mut conn)
            .await?)
    }

    #[tracing::instrument(skip(self, data))]
    async fn add_customer(&self, data: &CustomerData) -> RepoResult<Customer> {
        validate::customer_fields(&data.name, &data.phone)?;

        let mut conn = self.pool.get().await?;
        let created = diesel::insert_into(schema::customer::table)
            .values(data.as_insert())
            .returning(Customer::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(created)
    }

    #[tracing::instrument(skip(self, customer), fields(customer_id = customer.id))]
    async fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        validate::customer_fields(&customer.name, &customer.phone)?;

        let mut conn = self.pool.get().await?;
        let updated = diesel::update(schema::customer::table.find(customer.id))
            .set((
                schema::customer::name.eq(&customer.name),
                schema::customer::phone.eq(&customer.phone),
                schema::customer::phone_secondary.eq(customer.phone_secondary.as_deref()),
                schema::customer::email.eq(customer.email.as_deref()),
                schema::customer::address.eq(customer.address.as_deref()),
            ))
            .execute(&mut conn)
            .await?;

        if updated == 0 {
            return Err(RepoError::NotFound("Customer"));
        }
        Ok(())
    }

    async fn device_by_id(&self, id: i32) -> RepoResult<Option<Device>> {
        let mut conn = self.pool.get().await?;
        let device = query::device::by_id(id).first(&mut conn).await.optional()?;
        Ok(device)
    }

    async fn devices(&self) -> RepoResult<Vec<Device>> {
        let mut conn = self.pool.get().await?;
        Ok(query::device::all().load(&mut conn).await?)
    }

    async fn devices_by_name(&self, name: &str) -> RepoResult<Vec<Device>> {
        let mut conn = self.pool.get().await?;
        Ok(query::device::by_name(name).load(&mut conn).await?)
    }

    async fn devices_by_type(&self, device_type: &str) -> RepoResult<Vec<Device>> {
        let mut conn = self.pool.get().await?;
        Ok(query::device::by_type(device_type).load(&mut conn).await?)
    }

    #[tracing::instrument(skip(self, data))]
    async fn add_device(&self, data: &DeviceData) -> RepoResult<Device> {
        validate::device_fields(&data.name, &data.device_type)?;

        let mut conn = self.pool.get().await?;
        let created = diesel::insert_into(schema::device::table)
            .values(data.as_insert())
            .returning(Device::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(created)
    }

    #[tracing::instrument(skip(self, device), fields(device_id = device.id))]
    async fn update_device(&self, device: &Device) -> RepoResult<()> {
        validate::device_fields(&device.name, &device.device_type)?;

        let mut conn = self.pool.get().await?;
        let updated = diesel::update(schema::device::table.find(device.id))
            .set((
                schema::device::name.eq(&device.name),
                schema::device::device_type.eq(&device.device_type),
            ))
            .execute(&mut conn)
            .await?;

        if updated == 0 {
            return Err(RepoError::NotFound("Device"));
        }
        Ok(())
    }

    async fn problem_by_id(&self, id: i32) -> RepoResult<Option<Problem>> {
        let mut conn = self.pool.get().await?;
        let problem = query::problem::by_id(id)
            .first(&mut conn)
            .await
            .optional()?;
        Ok(problem)
    }

    async fn problems_of_device(&self, device_id: i32) -> RepoResult<Vec<Problem>> {
        let mut conn = self.pool.get().await?;
        Ok(query::problem::of_device(device_id).load(&mut conn).await?)
    }

    #[tracing::instrument(skip(self, data))]
    async fn add_problem(&self, data: &ProblemData) -> RepoResult<Problem> {
        validate::problem_fields(&data.name, &data.price)?;

        let mut conn = self.pool.get().await?;
        conn.transaction::<_, RepoError, _>(|tx| {
            async move {
                ensure_device_exists(tx, data.device_id).await?;

                let created = diesel::insert_into(schema::problem::table)
                    .values(data.as_insert())
                    .returning(Problem::as_returning())
                    .get_result(tx)
                    .await?;
                Ok(created)
            }
            .scope_boxed()
        })
        .await
    }

    #[tracing::instrument(skip(self, problem), fields(problem_id = problem.id))]
    async fn update_problem(&self, problem: &Problem) -> RepoResult<()> {
        validate::problem_fields(&problem.name, &problem.price)?;

        let mut conn = self.pool.get().await?;
        conn.transaction::<_, RepoError, _>(|tx| {
            async move {
                let existing: Option<Problem> = query::problem::by_id(problem.id)
                    .first(tx)
                    .await
                    .optional()?;
                if existing.is_none() {
                    return Err(RepoError::NotFound("Problem"));
                }

                ensure_device_exists(tx, problem.device_id).await?;

                diesel::update(schema::problem::table.find(problem.id))
                    .set((
                        schema::problem::name.eq(&problem.name),
                        schema::problem::price.eq(&problem.price),
                        schema::problem::device_id.eq(problem.device_id),
                    ))
                    .execute(tx)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn job_by_id(&self, id: i32) -> RepoResult<Option<JobRecord>> {
        let mut conn = self.pool.get().await?;
        let job: Option<Job> = query::job::by_id(id).first(&mut conn).await.optional()?;
        let Some(job) = job else {
            return Ok(None);
        };

        let problems = query::problem::attached_to_job(id).load(&mut conn).await?;
        Ok(Some(JobRecord { job, problems }))
    }

    async fn jobs(&self) -> RepoResult<Vec<JobRecord>> {
        let mut conn = self.pool.get().await?;
        let jobs: Vec<Job> = query::job::all().load(&mut conn).await?;
        let attached: Vec<Problem> = query::problem::attached().load(&mut conn).await?;

        let mut by_job: HashMap<i32, Vec<Problem>> = HashMap::new();
        for problem in attached {
            if let Some(job_id) = problem.job_id {
                by_job.entry(job_id).or_default().push(problem);
            }
        }

        Ok(jobs
            .into_iter()
            .map(|job| {
                let problems = by_job.remove(&job.id).unwrap_or_default();
                JobRecord { job, problems }
            })
            .collect())
    }

    #[tracing::instrument(skip(self, data))]
    async fn add_job(&self, data: &JobData) -> RepoResult<JobRecord> {
        validate::job_problems(&data.problems)?;

        let mut conn = self.pool.get().await?;
        conn.transaction::<_, RepoError, _>(|tx| {
            async move {
                ensure_customer_exists(tx, data.customer_id).await?;
                ensure_device_exists(tx, data.device_id).await?;

                let job: Job = diesel::insert_into(schema::job::table)
                    .values(data.as_insert())
                    .returning(Job::as_returning())
                    .get_result(tx)
                    .await?;

                let problems = attach_problems(tx, job.id, &data.problems).await?;
                Ok(JobRecord { job, problems })
            }
            .scope_boxed()
        })
        .await
    }

    #[tracing::instrument(skip(self, data), fields(job_id = id))]
    async fn update_job(&self, id: i32, data: &JobData) -> RepoResult<()> {
        validate::job_problems(&data.problems)?;

        let mut conn = self.pool.get().await?;
        conn.transaction::<_, RepoError, _>(|tx| {
            async move {
                let existing: Option<Job> = query::job::by_id(id).first(tx).await.optional()?;
                if existing.is_none() {
                    return Err(RepoError::NotFound("Job"));
                }

                ensure_customer_exists(tx, data.customer_id).await?;
                ensure_device_exists(tx, data.device_id).await?;

                diesel::update(schema::job::table.find(id))
                    .set((
                        schema::job::customer_id.eq(data.customer_id),
                        schema::job::device_id.eq(data.device_id),
                        schema::job::receive_time.eq(data.receive_time),
                        schema::job::pickup_time.eq(data.pickup_time),
                        schema::job::estimated_pickup_time.eq(data.estimated_pickup_time),
                        schema::job::note.eq(data.note.as_deref()),
                        schema::job::estimated_price.eq(data.estimated_price.clone()),
                        schema::job::collected_price.eq(data.collected_price.clone()),
                        schema::job::is_finished.eq(data.is_finished),
                    ))
                    .execute(tx)
                    .await?;

                // Replace the attached problem set wholesale.
                diesel::update(schema::problem::table.filter(schema::problem::job_id.eq(id)))
                    .set(schema::problem::job_id.eq(None::<i32>))
                    .execute(tx)
                    .await?;
                attach_problems(tx, id, &data.problems).await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}
