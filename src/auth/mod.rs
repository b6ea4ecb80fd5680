pub mod password;
pub mod session;
pub mod token;

pub use password::PasswordHasher;
pub use session::{SessionResolver, SESSION_COOKIE};
pub use token::{Claims, SessionTokenCodec, TokenError};
