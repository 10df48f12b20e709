//! BST API wire types
//!
//! Request and response shapes exchanged between the web gateway and the
//! BST API, plus the envelopes the gateway hands back to browsers:
//! - `ApiStatus` reports the health of the API, e-amusement gate and database
//! - `OperationResult` is the `{status, message}` envelope for mutating calls
//! - `StatisticsRow` is one DDR play record

pub mod ddr;
pub mod eagate;
pub mod outcome;
pub mod status;

pub use ddr::StatisticsRow;
pub use eagate::{LoginRequest, LogoutRequest, UserRecord};
pub use outcome::{OperationResult, ResultStatus};
pub use status::{ApiStatus, HealthState, StatusReport};
