mod database;
mod email;
mod hashing;
mod jwt;
mod myconfig;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::email::{LogMailer, SmtpMailer};
pub use self::hashing::Hashing;
pub use self::jwt::{ACCESS_TOKEN_TTL_HOURS, Claims, JwtConfig};
pub use self::myconfig::{Config, EmailConfig};
