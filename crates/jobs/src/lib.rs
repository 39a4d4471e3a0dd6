pub mod dns_refresh;
pub mod expiry_check;
pub mod runner;

pub use dns_refresh::DnsRefreshJob;
pub use expiry_check::{next_run, ExpiryCheckJob};
pub use runner::{JobRunner, StartedJobs};
