mod api;
mod category;
mod dashboard;
mod notification;
mod pagination;
mod product;
mod rfq;
mod role;
mod token;
mod user;

pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::category::CategoryResponse;
pub use self::dashboard::{
    AdminDashboard, BuyerDashboard, CaptainDashboard, HrDashboard, SellerDashboard, StatusCount,
};
pub use self::notification::{NotificationResponse, UnreadCountResponse};
pub use self::pagination::Pagination;
pub use self::product::ProductResponse;
pub use self::rfq::RfqResponse;
pub use self::role::RoleResponse;
pub use self::token::LoginResponse;
pub use self::user::{UserProfileResponse, UserResponse};
