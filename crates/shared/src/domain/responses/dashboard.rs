use crate::model::StatusTally;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct BuyerDashboard {
    pub rfqs_by_status: Vec<StatusCount>,
    pub total_rfqs: i64,
    pub unread_notifications: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SellerDashboard {
    pub products_by_status: Vec<StatusCount>,
    pub rfqs_by_status: Vec<StatusCount>,
    pub unread_notifications: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CaptainDashboard {
    pub pending_products: i64,
    pub rfqs_by_status: Vec<StatusCount>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AdminDashboard {
    pub users_by_role: Vec<StatusCount>,
    pub blocked_users: i64,
    pub products_by_status: Vec<StatusCount>,
    pub rfqs_by_status: Vec<StatusCount>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HrDashboard {
    pub captains: i64,
    pub hr_staff: i64,
    pub unverified_users: i64,
}

impl From<StatusTally> for StatusCount {
    fn from(value: StatusTally) -> Self {
        StatusCount {
            status: value.status,
            count: value.total,
        }
    }
}
