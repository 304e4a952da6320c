//! Service layer providing the product record store on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Persistence sits behind `ProductStore` so callers never see the file.

pub mod errors;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod store;
pub mod file;
