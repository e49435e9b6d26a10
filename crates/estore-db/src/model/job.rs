use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;
use crate::model::problem::Problem;

/// A repair job row: one customer bringing one device in. The attached
/// problems live in the `problem` table and are carried by [`JobRecord`]
/// on the wire.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::job)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub customer_id: i32,
    pub device_id: i32,
    pub receive_time: DateTime<Utc>,
    pub pickup_time: Option<DateTime<Utc>>,
    pub estimated_pickup_time: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub estimated_price: Option<BigDecimal>,
    pub collected_price: Option<BigDecimal>,
    pub is_finished: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::job)]
pub struct NewJob<'a> {
    pub customer_id: i32,
    pub device_id: i32,
    pub receive_time: DateTime<Utc>,
    pub pickup_time: Option<DateTime<Utc>>,
    pub estimated_pickup_time: Option<DateTime<Utc>>,
    pub note: Option<&'a str>,
    pub estimated_price: Option<&'a BigDecimal>,
    pub collected_price: Option<&'a BigDecimal>,
    pub is_finished: bool,
}

/// API representation of a job: the row plus its attached problem records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(flatten)]
    pub job: Job,
    pub problems: Vec<Problem>,
}

/// Create payload: a job before the store has assigned its id. Problems are
/// referenced by id and must name at least one existing problem row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobData {
    pub customer_id: i32,
    pub device_id: i32,
    pub receive_time: DateTime<Utc>,
    #[serde(default)]
    pub pickup_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_pickup_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub estimated_price: Option<BigDecimal>,
    #[serde(default)]
    pub collected_price: Option<BigDecimal>,
    #[serde(default)]
    pub is_finished: bool,
    pub problems: Vec<i32>,
}

/// Update payload: a full replacement record addressed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobUpdate {
    pub id: i32,
    #[serde(flatten)]
    pub data: JobData,
}

impl JobData {
    #[must_use]
    pub fn as_insert(&self) -> NewJob<'_> {
        NewJob {
            customer_id: self.customer_id,
            device_id: self.device_id,
            receive_time: self.receive_time,
            pickup_time: self.pickup_time,
            estimated_pickup_time: self.estimated_pickup_time,
            note: self.note.as_deref(),
            estimated_price: self.estimated_price.as_ref(),
            collected_price: self.collected_price.as_ref(),
            is_finished: self.is_finished,
        }
    }
}
