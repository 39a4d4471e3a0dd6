use certwatch_api::AppState;
use certwatch_application::use_cases::{
    BulkSettings, CheckExpiryUseCase, CreateDomainUseCase, DeleteDomainUseCase,
    DrainRefreshQueueUseCase, EnrichDomainsUseCase, GetCacheStatsUseCase, GetCertificateUseCase,
    GetDomainUseCase, ListDomainsUseCase, PrewarmCacheUseCase,
};
use certwatch_domain::Config;
use certwatch_infrastructure::notifications::LogExpiryNotifier;
use std::sync::Arc;

use super::{Repositories, Services};

pub struct UseCases {
    pub get_certificate: Arc<GetCertificateUseCase>,
    pub enrich_domains: Arc<EnrichDomainsUseCase>,
    pub list_domains: Arc<ListDomainsUseCase>,
    pub create_domain: Arc<CreateDomainUseCase>,
    pub get_domain: Arc<GetDomainUseCase>,
    pub delete_domain: Arc<DeleteDomainUseCase>,
    pub get_stats: Arc<GetCacheStatsUseCase>,
    pub prewarm: Arc<PrewarmCacheUseCase>,
    pub drain_refresh: Arc<DrainRefreshQueueUseCase>,
    pub check_expiry: Arc<CheckExpiryUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, repos: &Repositories, services: &Services) -> Self {
        let enrich_domains = Arc::new(EnrichDomainsUseCase::new(
            services.fetcher.clone(),
            services.refresh_queue.clone(),
            services.list_cache.clone(),
            services.clock.clone(),
            BulkSettings::from_config(&config.bulk),
        ));

        Self {
            get_certificate: Arc::new(GetCertificateUseCase::new(
                services.fetcher.clone(),
                services.refresh_queue.clone(),
            )),
            list_domains: Arc::new(ListDomainsUseCase::new(services.list_cache.clone())),
            create_domain: Arc::new(CreateDomainUseCase::new(
                repos.domains.clone(),
                services.list_cache.clone(),
                enrich_domains.clone(),
            )),
            get_domain: Arc::new(GetDomainUseCase::new(
                repos.domains.clone(),
                enrich_domains.clone(),
            )),
            delete_domain: Arc::new(DeleteDomainUseCase::new(
                repos.domains.clone(),
                services.list_cache.clone(),
                services.fetcher.clone(),
            )),
            get_stats: Arc::new(GetCacheStatsUseCase::new(
                services.fetcher.clone(),
                services.refresh_queue.clone(),
                services.list_cache.clone(),
                services.clock.clone(),
            )),
            prewarm: Arc::new(PrewarmCacheUseCase::new(
                repos.domains.clone(),
                services.fetcher.clone(),
                &config.bulk,
            )),
            drain_refresh: Arc::new(DrainRefreshQueueUseCase::new(
                services.fetcher.clone(),
                services.refresh_queue.clone(),
            )),
            check_expiry: Arc::new(CheckExpiryUseCase::new(
                repos.domains.clone(),
                services.fetcher.clone(),
                Arc::new(LogExpiryNotifier::new()),
                services.clock.clone(),
            )),
            enrich_domains,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            get_certificate: self.get_certificate.clone(),
            enrich_domains: self.enrich_domains.clone(),
            list_domains: self.list_domains.clone(),
            create_domain: self.create_domain.clone(),
            get_domain: self.get_domain.clone(),
            delete_domain: self.delete_domain.clone(),
            get_stats: self.get_stats.clone(),
        }
    }
}
