pub mod database;
pub mod notifications;
pub mod probes;
pub mod repositories;
