//! Domain types for the edge host registry.

mod address;
mod capability;
mod error;
mod host;
mod name;

pub use address::HostAddress;
pub use capability::Capability;
pub use error::HostDomainError;
pub use host::{Host, NewHostData, PersistedHostData};
pub use name::HostName;
