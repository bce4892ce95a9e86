//! Auth-domain identifiers, credential bundles, and profile models.

pub mod credentials;
pub mod id;
pub mod profile;

pub use credentials::*;
pub use id::*;
pub use profile::*;
