use bigdecimal::BigDecimal;
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// A known, priced problem scoped to one device. `job_id` is set while the
/// row is attached to a job.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::problem)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub device_id: i32,
    #[serde(default)]
    pub job_id: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::problem)]
pub struct NewProblem<'a> {
    pub name: &'a str,
    pub price: &'a BigDecimal,
    pub device_id: i32,
}

/// Create payload: a problem before the store has assigned its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemData {
    pub name: String,
    pub price: BigDecimal,
    pub device_id: i32,
}

impl ProblemData {
    #[must_use]
    pub fn as_insert(&self) -> NewProblem<'_> {
        NewProblem {
            name: &self.name,
            price: &self.price,
            device_id: self.device_id,
        }
    }
}
