use async_trait::async_trait;
use certwatch_application::ports::DomainRepository;
use certwatch_domain::{canonical_host, DomainError, MonitoredDomain};
use sqlx::SqlitePool;
use tracing::{error, instrument};

type DomainRow = (i64, String, String);

pub struct SqliteDomainRepository {
    pool: SqlitePool,
}

impl SqliteDomainRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_domain(row: DomainRow) -> MonitoredDomain {
        let (id, domain, created_at) = row;
        MonitoredDomain::new(id, domain, created_at)
    }
}

fn database_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!(error = %e, "{}", context);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl DomainRepository for SqliteDomainRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<MonitoredDomain>, DomainError> {
        let rows = sqlx::query_as::<_, DomainRow>(
            "SELECT id, domain, created_at FROM domains ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list domains"))?;

        Ok(rows.into_iter().map(Self::row_to_domain).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<MonitoredDomain>, DomainError> {
        let row = sqlx::query_as::<_, DomainRow>(
            "SELECT id, domain, created_at FROM domains WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to query domain by id"))?;

        Ok(row.map(Self::row_to_domain))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, domain: &str) -> Result<Option<MonitoredDomain>, DomainError> {
        let row = sqlx::query_as::<_, DomainRow>(
            "SELECT id, domain, created_at FROM domains WHERE domain = ?",
        )
        .bind(canonical_host(domain))
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to query domain by name"))?;

        Ok(row.map(Self::row_to_domain))
    }

    #[instrument(skip(self))]
    async fn create(&self, domain: &str) -> Result<MonitoredDomain, DomainError> {
        let domain = canonical_host(domain);
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let result = sqlx::query("INSERT INTO domains (domain, created_at) VALUES (?, ?)")
            .bind(&domain)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint failed") {
                    DomainError::DomainAlreadyExists(domain.clone())
                } else {
                    error!(error = %e, "Failed to create domain");
                    DomainError::DatabaseError(e.to_string())
                }
            })?;

        Ok(MonitoredDomain::new(result.last_insert_rowid(), domain, now))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<Option<MonitoredDomain>, DomainError> {
        let row = sqlx::query_as::<_, DomainRow>(
            "DELETE FROM domains WHERE id = ? RETURNING id, domain, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to delete domain"))?;

        Ok(row.map(Self::row_to_domain))
    }
}
