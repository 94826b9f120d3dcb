//! Service layer providing business operations on top of models.
//! - Separates business logic from data access behind repository traits.
//! - Validates inbound DTOs before touching storage.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod validation;
pub mod auth;
pub mod home;
#[cfg(test)]
pub mod test_support;
