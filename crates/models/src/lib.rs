//! Domain entities and input validation for the inventory service.
//!
//! Nothing here touches the filesystem; the `service` crate owns persistence.

pub mod errors;
pub mod product;
