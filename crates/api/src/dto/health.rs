use certwatch_application::use_cases::HealthSnapshot;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CacheSizes {
    pub certificates: usize,
    pub certificate_capacity: usize,
    pub failures: usize,
    pub failure_capacity: usize,
    pub dns: usize,
    pub dns_capacity: usize,
    pub domain_list_cached: bool,
}

#[derive(Debug, Serialize)]
pub struct FetcherCounters {
    pub hits: u64,
    pub misses: u64,
    pub probes: u64,
    pub probe_failures: u64,
    pub failures_served: u64,
    pub single_flight_joins: u64,
    pub dns_lookups: u64,
    pub in_flight_probes: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub cache: CacheSizes,
    pub refresh_queue_depth: usize,
    pub refresh_in_flight: usize,
    pub counters: FetcherCounters,
}

impl From<HealthSnapshot> for HealthResponse {
    fn from(snapshot: HealthSnapshot) -> Self {
        let stats = snapshot.fetcher;
        Self {
            status: "ok",
            uptime_secs: snapshot.uptime_secs,
            cache: CacheSizes {
                certificates: stats.certificate_entries,
                certificate_capacity: stats.certificate_capacity,
                failures: stats.failure_entries,
                failure_capacity: stats.failure_capacity,
                dns: stats.dns_entries,
                dns_capacity: stats.dns_capacity,
                domain_list_cached: snapshot.domain_list_cached,
            },
            refresh_queue_depth: snapshot.queue_depth,
            refresh_in_flight: snapshot.queue_in_flight,
            counters: FetcherCounters {
                hits: stats.hits,
                misses: stats.misses,
                probes: stats.probes,
                probe_failures: stats.probe_failures,
                failures_served: stats.failures_served,
                single_flight_joins: stats.single_flight_joins,
                dns_lookups: stats.dns_lookups,
                in_flight_probes: stats.in_flight_probes,
            },
        }
    }
}
