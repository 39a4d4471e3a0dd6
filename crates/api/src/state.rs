use certwatch_application::use_cases::{
    CreateDomainUseCase, DeleteDomainUseCase, EnrichDomainsUseCase, GetCacheStatsUseCase,
    GetCertificateUseCase, GetDomainUseCase, ListDomainsUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_certificate: Arc<GetCertificateUseCase>,
    pub enrich_domains: Arc<EnrichDomainsUseCase>,
    pub list_domains: Arc<ListDomainsUseCase>,
    pub create_domain: Arc<CreateDomainUseCase>,
    pub get_domain: Arc<GetDomainUseCase>,
    pub delete_domain: Arc<DeleteDomainUseCase>,
    pub get_stats: Arc<GetCacheStatsUseCase>,
}
