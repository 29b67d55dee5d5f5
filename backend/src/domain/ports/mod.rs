//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UsersSource`], [`GlobalFoldersSource`],
//! [`UserFoldersSource`]) are implemented by outbound adapters; the driving
//! port [`InconsistencyDetection`] is consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod global_folders_source;
mod inconsistency_detection;
mod retrieval_error;
mod user_folders_source;
mod users_source;

#[cfg(test)]
pub use global_folders_source::MockGlobalFoldersSource;
pub use global_folders_source::{FixtureGlobalFoldersSource, GlobalFoldersSource};
#[cfg(test)]
pub use inconsistency_detection::MockInconsistencyDetection;
pub use inconsistency_detection::{
    DetectionError, FixtureInconsistencyDetection, InconsistencyDetection,
};
pub use retrieval_error::RetrievalError;
#[cfg(test)]
pub use user_folders_source::MockUserFoldersSource;
pub use user_folders_source::{FixtureUserFoldersSource, UserFoldersSource};
#[cfg(test)]
pub use users_source::MockUsersSource;
pub use users_source::{FixtureUsersSource, UsersSource};
