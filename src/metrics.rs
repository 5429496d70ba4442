//! Counters for GraphQL operations and database connection attempts,
//! optionally exported to Prometheus.

use std::net::SocketAddr;
use tracing::{info, warn};

pub const OPERATIONS_TOTAL: &str = "bandhub_graphql_operations_total";
pub const CONNECTIONS_TOTAL: &str = "bandhub_db_connections_total";

/// Install the Prometheus exporter serving `/metrics` on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            register_metrics();
            info!("Prometheus exporter listening on http://{}/metrics", addr);
        }
        Err(e) => {
            warn!("Prometheus exporter install failed (possibly already installed): {}", e);
        }
    }
}

/// Pre-register counters so they appear before first use.
pub fn register_metrics() {
    let _ = ::metrics::counter!(CONNECTIONS_TOTAL, "outcome" => "opened");
    let _ = ::metrics::counter!(CONNECTIONS_TOTAL, "outcome" => "failed");
}

pub struct GraphQLMetrics;

impl GraphQLMetrics {
    pub fn record<T, E>(operation: &'static str, result: &Result<T, E>) {
        let outcome = if result.is_ok() { "ok" } else { "error" };
        ::metrics::counter!(OPERATIONS_TOTAL, "operation" => operation, "outcome" => outcome)
            .increment(1);
    }
}

pub struct DbMetrics;

impl DbMetrics {
    pub fn record_connection_opened() {
        ::metrics::counter!(CONNECTIONS_TOTAL, "outcome" => "opened").increment(1);
    }

    pub fn record_connection_failed() {
        ::metrics::counter!(CONNECTIONS_TOTAL, "outcome" => "failed").increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_exporter_is_a_no_op() {
        register_metrics();
        GraphQLMetrics::record::<(), ()>("getBands", &Ok(()));
        DbMetrics::record_connection_failed();
    }
}
