pub mod finding;
pub mod options;
pub mod types;

pub use finding::{Finding, codes};
pub use options::AuditOptions;
pub use types::{ColumnTypes, Metadata};
