mod logs;
mod metrics;
mod random_string;
mod shutdown;
mod vendor_code;

pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::random_string::generate_random_string;
pub use self::shutdown::shutdown_signal;
pub use self::vendor_code::generate_vendor_code;
