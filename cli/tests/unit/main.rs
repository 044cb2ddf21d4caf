//! Unit tests for the lxc CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod launch_service;
mod property_tests;
