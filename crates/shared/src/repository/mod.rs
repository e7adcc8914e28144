mod category;
mod dashboard;
mod notification;
mod product;
mod reset_token;
mod rfq;
mod role;
mod user;

pub use self::category::CategoryRepository;
pub use self::dashboard::DashboardRepository;
pub use self::notification::NotificationRepository;
pub use self::product::ProductRepository;
pub use self::reset_token::ResetTokenRepository;
pub use self::rfq::RfqRepository;
pub use self::role::RoleRepository;
pub use self::user::UserRepository;

/// `None` for a blank search box so the `$n::TEXT IS NULL` guard skips the filter.
pub(crate) fn search_pattern(search: &str) -> Option<&str> {
    let search = search.trim();
    if search.is_empty() { None } else { Some(search) }
}
