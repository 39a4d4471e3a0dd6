mod domain_list_cache;
mod ttl_cache;

pub use domain_list_cache::DomainListCache;
pub use ttl_cache::{CacheEntry, EvictionListener, TtlCache};
