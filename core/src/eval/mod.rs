pub mod crossref;
pub mod evaluator;
pub mod retention;
pub mod schema;
pub mod score;
pub mod structural;

pub use evaluator::{EvaluationResult, ItemStatus, RequirementEvaluator};
pub use score::ScoreSummary;
