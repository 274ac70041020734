//! Authentication module
//!
//! JWT issuance/verification, the bearer-token auth gate and argon2
//! password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, TokenError, TokenIdentity};
pub use middleware::{authenticate, bearer_token, require_auth, AuthUser};
pub use password::PasswordService;
