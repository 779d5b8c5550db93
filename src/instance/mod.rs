//! Application instance registry: records mapping deployed instances to
//! their host, tenant, and backend kind, plus tenant bookkeeping and the
//! auxiliary auth-config material torn down alongside an instance.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
