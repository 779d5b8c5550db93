//! Domain types for backend selection and remote lifecycle calls.

mod backend;
mod credential;
mod status;

pub use backend::{BackendKind, UnknownBackendError};
pub use credential::Credential;
pub use status::{InstantiateOutcome, RemoteStatus};
