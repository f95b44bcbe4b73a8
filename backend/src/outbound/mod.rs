//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Only PostgreSQL persistence exists today. Adapters are thin translators
//! between domain types and Diesel rows and contain no business logic.

pub mod persistence;
