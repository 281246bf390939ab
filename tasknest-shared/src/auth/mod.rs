/// Authentication utilities
///
/// - `password`: Argon2id password hashing and verification
/// - `jwt`: Bearer token issuance and validation
/// - `middleware`: Axum middleware that turns a bearer token into an
///   [`middleware::AuthContext`] request extension

pub mod jwt;
pub mod middleware;
pub mod password;
