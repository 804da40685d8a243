//! Authentication
//!
//! Validates bearer access tokens issued by the identity service and attaches
//! the calling `Principal` to the request. Login and token refresh live
//! elsewhere.

mod error;
pub mod jwt;
mod middleware;

pub use error::{AuthError, AuthResult, ErrorResponse};
pub use middleware::{authenticate, Principal};
