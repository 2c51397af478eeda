pub mod interface_log;
pub mod log_severity;
pub mod log_status;
