use crate::DomainError;

/// Longest accepted domain name, exclusive.
const MAX_DOMAIN_LEN: usize = 254;

/// Checks that `domain` looks like `label.label.tld`.
///
/// Accepts ASCII letters, digits, dots and hyphens, and requires a final
/// alphabetic label of at least two characters. Leading and trailing
/// whitespace is ignored.
pub fn validate_domain(domain: &str) -> Result<(), DomainError> {
    let trimmed = domain.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain cannot be empty".to_string(),
        ));
    }

    if trimmed.len() >= MAX_DOMAIN_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "domain cannot exceed {} characters",
            MAX_DOMAIN_LEN - 1
        )));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if !valid_chars {
        return Err(DomainError::InvalidDomainName(trimmed.to_string()));
    }

    let Some((head, tld)) = trimmed.rsplit_once('.') else {
        return Err(DomainError::InvalidDomainName(trimmed.to_string()));
    };

    if head.is_empty() || tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::InvalidDomainName(trimmed.to_string()));
    }

    Ok(())
}

/// Canonical host form shared by every cache key: trimmed and lowercased.
pub fn canonical_host(domain: &str) -> String {
    domain.trim().to_ascii_lowercase()
}

/// Key of the certificate success and failure caches.
pub fn certificate_cache_key(domain: &str, port: u16) -> String {
    format!("{}:{}", canonical_host(domain), port)
}
