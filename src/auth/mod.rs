//! Authentication: register, login, JWT.

mod handlers;
mod jwt;
mod password;

pub use handlers::{login, me, register};
pub use jwt::{Claims, JwtSecret, TOKEN_TTL_HOURS};
pub use password::{hash_password, verify_password};
