//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Signup, signin, product-key issuance and bearer-token verification live
//! here, independent of the web framework.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthConfig, AuthService};
