//! Shared test fixtures for the trakk workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures at two realism levels
//! - [`home`]: [`TestHome`] builder for a home directory with a tracked repository

pub mod git;
pub mod home;

pub use home::TestHome;
