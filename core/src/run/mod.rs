pub mod runner;

pub use runner::{default_operator, AuditOutcome, AuditRequest, AuditRunner};
