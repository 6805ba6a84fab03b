//! Integration tests for fsattr-platform, run against real files.

mod common;
mod provider_tests;
mod resolution_tests;
mod xattr_tests;
