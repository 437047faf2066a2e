pub mod traits;

pub mod http_catalog;
pub mod tracing_notifier;
