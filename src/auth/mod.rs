pub mod middleware;
pub mod password;
pub mod session;

pub use middleware::AdminUser;
pub use session::{SESSION_COOKIE, Session, SessionStore};
