//! Value types shared between the API and manager boundaries.

pub mod lease;
pub mod version;

pub use lease::{Host, Lease, LeaseStatus};
pub use version::{Version, VersionLink};
