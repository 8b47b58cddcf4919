pub mod pipeline;
pub mod result;

pub use pipeline::ReconciliationPipeline;
pub use result::{BatchResult, RecordError, RecordErrorKind};
