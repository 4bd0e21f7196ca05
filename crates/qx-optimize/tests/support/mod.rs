//! Shared test fixtures for qx-optimize integration tests.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
