mod create_domain;
mod delete_domain;
mod enrich_domains;
mod get_domain;
mod list_domains;

pub use create_domain::CreateDomainUseCase;
pub use delete_domain::DeleteDomainUseCase;
pub use enrich_domains::{BulkSettings, EnrichDomainsUseCase};
pub use get_domain::GetDomainUseCase;
pub use list_domains::ListDomainsUseCase;
