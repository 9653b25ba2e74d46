//! Record stores and the report gateway.
//!
//! One repository per resource, each holding a clone of the shared
//! connection pool. Every method issues exactly one statement: no implicit
//! retries, no multi-statement transactions. Single-record consistency under
//! concurrent writers is the backend's job.

pub mod assessments;
pub mod clinicians;
pub mod patients;
pub mod reports;
