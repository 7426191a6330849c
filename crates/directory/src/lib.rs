//! `idadmin-directory`: the user directory capability.
//!
//! The directory owns user records; callers see it only through the
//! [`Directory`] trait so that a fake can be substituted in tests.

pub mod identity_toolkit;
pub mod in_memory;
pub mod record;
pub mod r#trait;

pub use identity_toolkit::IdentityToolkitDirectory;
pub use in_memory::InMemoryDirectory;
pub use record::UserRecord;
pub use r#trait::{Directory, DirectoryError};
