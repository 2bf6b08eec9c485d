// Authentication module
// Password-based login issuing signed, time-limited bearer tokens

pub mod error;
pub mod middleware;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use middleware::{require_auth, AuthenticatedUser};
pub use service::AuthService;
pub use token::{Claims, TokenService};
