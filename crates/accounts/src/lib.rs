//! `idadmin-accounts`: admin account operations.
//!
//! Three independent procedures, each a single pass:
//! unauthenticated → unauthorized → invalid input → operate.
//! Authorization is always decided before the directory is touched.

pub mod ops;
pub mod procedure;
pub mod request;

pub use ops::AdminAccountOps;
pub use procedure::Procedure;
pub use request::required_uid;
