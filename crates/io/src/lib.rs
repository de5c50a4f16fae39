// File I/O: price-list loading and report export

pub mod error;
pub mod loader;
pub mod report;

pub use error::{ExportError, LoadError};
pub use loader::{load_catalog, BadFilePolicy, LoadReport};
pub use report::{export_report, ExportOutcome};
