//! Correlation id constants shared across service boundaries.
//!
//! The id is per-request context, never process state: middleware stores it
//! in request extensions and every outbound call must receive it explicitly.

use uuid::Uuid;

/// HTTP header used to carry the correlation id between services.
pub const HTTP_CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Generate a fresh correlation id for a request that arrived without one.
pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_uuid_shaped() {
        let id = new_correlation_id();
        assert_eq!(id.len(), 36);
        assert!(id.contains('-'));
    }
}
