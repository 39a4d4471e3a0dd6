use certwatch_application::ports::DomainRepository;
use certwatch_infrastructure::repositories::SqliteDomainRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub domains: Arc<dyn DomainRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            domains: Arc::new(SqliteDomainRepository::new(pool)),
        }
    }
}
