//! Response bodies for the API.
//!
//! All DTOs serialize with Serde. Error bodies live next to
//! [`AppError`](crate::error::AppError) as [`ErrorBody`](crate::error::ErrorBody).

pub mod health;
pub mod url_pair;
