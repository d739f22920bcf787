//! Query timing and pool gauges.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Times a single repository query.
///
/// Create the timer before the query, call [`QueryTimer::record`] after it
/// resolves. Query names are static so they double as histogram labels.
///
/// ```ignore
/// let timer = QueryTimer::new("list_steps_by_form");
/// let rows = sqlx::query_as::<_, StepEntity>(...).fetch_all(&self.pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    query: &'static str,
    started: Instant,
}

impl QueryTimer {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            started: Instant::now(),
        }
    }

    /// Records the elapsed time. Consumes the timer so a query cannot be
    /// counted twice.
    pub fn record(self) {
        histogram!("db_query_duration_seconds", "query" => self.query)
            .record(self.started.elapsed().as_secs_f64());
    }
}

/// Snapshots connection pool occupancy. Driven by a periodic task at
/// startup.
pub fn record_pool_metrics(pool: &PgPool) {
    let total = pool.size() as f64;
    let idle = pool.num_idle() as f64;

    gauge!("db_pool_connections", "state" => "idle").set(idle);
    gauge!("db_pool_connections", "state" => "active").set((total - idle).max(0.0));
    gauge!("db_pool_size").set(total);
}
