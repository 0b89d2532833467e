//! Outbound adapters implementing [`crate::domain::ports::UserStore`].
//!
//! - **memory**: process-local document collection, used when no database
//!   is configured
//! - **persistence**: PostgreSQL via Diesel
//!
//! Adapters translate between domain types and storage representations and
//! hold no business logic.

pub mod memory;
pub mod persistence;
