pub mod customer;
pub mod device;
pub mod job;
pub mod problem;

pub use customer::{Customer, CustomerData, NewCustomer};
pub use device::{Device, DeviceData, NewDevice};
pub use job::{Job, JobData, JobRecord, JobUpdate, NewJob};
pub use problem::{NewProblem, Problem, ProblemData};
