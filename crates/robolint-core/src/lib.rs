pub mod action;
pub mod error;
pub mod plugin;
pub mod report;
pub mod repository;
pub mod schema;

pub use action::validate_action;
pub use error::{Result, RobolintError};
pub use plugin::{validate_document, validate_plugin, PluginValidation};
pub use report::ValidationReport;
pub use repository::{IndexUpdate, ManifestValidation, Repository};
