pub mod certificates;
pub mod domains;
pub mod health;

pub use certificates::{get_certificate_bulk, get_certificate_info};
pub use domains::{create_domain, delete_domain, get_domain, list_domains};
pub use health::health_check;
