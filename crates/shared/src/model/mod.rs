mod category;
mod notification;
mod product;
mod reset_token;
mod rfq;
mod role;
mod stats;
mod user;
mod user_role;

pub use self::category::Category;
pub use self::notification::Notification;
pub use self::product::Product;
pub use self::reset_token::ResetToken;
pub use self::rfq::{Rfq, RfqWithSeller};
pub use self::role::Role;
pub use self::stats::StatusTally;
pub use self::user::{User, UserWithRole};
pub use self::user_role::UserRole;
