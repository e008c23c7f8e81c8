pub mod assembler;
pub mod canonical;
pub mod model;
pub mod writer;

pub use assembler::{assemble_report, fallback_report, AuditResults};
pub use model::{AuditReport, CatalogInfo, ItemDetail, ReportIssues, RunContext};
pub use writer::{verify_report, write_report, Verification, WrittenReport};
