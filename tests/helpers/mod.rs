//! Test helpers module
//!
//! Fixture builders and the PostgreSQL test database wrapper shared by the
//! integration tests.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;
