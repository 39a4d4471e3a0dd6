mod certificate_probe;
mod clock;
mod dns_probe;
mod domain_repository;
mod expiry_notifier;

pub use certificate_probe::CertificateProbe;
pub use clock::{Clock, ManualClock, SystemClock};
pub use dns_probe::DnsProbe;
pub use domain_repository::DomainRepository;
pub use expiry_notifier::ExpiryNotifier;
