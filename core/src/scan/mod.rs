pub mod category;
pub mod classifier;
pub mod inventory;

pub use category::EvidenceCategory;
pub use classifier::{classify_tree, Classification, ClassifiedFile};
pub use inventory::{EvidenceInventory, ScannedFile};
