// Infrastructure layer modules
pub mod config;
pub mod crew_role_repository;
pub mod event_record_repository;
pub mod logging;
pub mod repository_error;

// Re-exports
pub use config::{DynamoDbConfig, DynamoDbConfigError, TableSettings};
pub use crew_role_repository::{CrewRoleRepository, DynamoCrewRoleRepository};
pub use event_record_repository::{DynamoEventRecordRepository, EventRecordRepository};
pub use logging::init_logging;
pub use repository_error::RepositoryError;
