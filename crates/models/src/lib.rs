//! SeaORM entities for the listing store plus the connection helpers.
//!
//! Multi-step writes that must not leave orphaned rows (a home with half of
//! its images, images of a deleted home) live here as transactional helpers.

pub mod errors;
pub mod db;
pub mod user;
pub mod home;
pub mod image;

#[cfg(test)]
mod tests;
