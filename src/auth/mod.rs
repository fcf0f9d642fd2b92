pub mod claims;
pub mod extractor;
pub mod jwt;
pub mod session;

pub use claims::AdminClaims;
pub use jwt::JwtService;
pub use session::{require_admin, AdminGate, AdminSession};
