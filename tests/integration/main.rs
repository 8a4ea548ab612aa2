//! Integration test entry point.

mod helpers;

mod context_test;
mod selector_test;
mod v1_lease_test;
mod v2_extension_test;
