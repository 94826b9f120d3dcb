//! Home listings: filter construction, DTOs, repository seam and the
//! service holding the ownership rules.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::HomeService;
