// Domain layer modules
pub mod contact_filter;
pub mod crew_role;
pub mod event_record;
pub mod queue_message;

// Re-exports
pub use contact_filter::{ContactFilter, ContactPolicy, SkipReason, ALLOWED_COUNTRIES, CONTACT_FIELD};
pub use crew_role::{CrewRole, CrewRoleKey, CrewRoleValidationError, MOVIE_ID_ATTR, ROLE_ATTR};
pub use event_record::{
    CaptureTime, ContactlessEventRecord, EventRecord, IngestedEventRecord,
};
pub use queue_message::{MessageParseError, QueueMessage};
