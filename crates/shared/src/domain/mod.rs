mod actor;
mod product_status;
mod rfq_status;
mod role_code;

pub mod requests;
pub mod responses;

pub use self::actor::Actor;
pub use self::product_status::ProductStatus;
pub use self::rfq_status::{RfqParty, RfqStatus};
pub use self::role_code::RoleCode;
