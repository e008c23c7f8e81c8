pub mod catalog;
pub mod config;
pub mod eval;
pub mod evidence;
pub mod report;
pub mod run;
pub mod scan;

pub mod error;
