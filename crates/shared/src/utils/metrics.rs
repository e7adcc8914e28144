use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    fmt::Display,
    fs,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use sysinfo::System;
use tokio::time::Instant;
use tracing::{error, info};

/// Reads the `Threads:` field of `/proc/self/status`. `None` off Linux.
fn process_threads() -> Option<i64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    status
        .lines()
        .find_map(|line| line.strip_prefix("Threads:"))
        .and_then(|count| count.trim().parse().ok())
}

/// Process health gauges exposed next to the per-service request metrics.
#[derive(Debug, Clone, Default)]
pub struct SystemMetrics {
    resident_bytes: Gauge,
    virtual_bytes: Gauge,
    host_available_bytes: Gauge,
    threads: Gauge,
    cpu_usage_percent: Gauge,
    start_time: Gauge,
}

impl SystemMetrics {
    pub fn new() -> Self {
        let metrics = Self::default();
        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        metrics.start_time.set(started);
        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        let gauges = [
            ("process_resident_memory_bytes", "Resident memory of the marketplace process", &self.resident_bytes),
            ("process_virtual_memory_bytes", "Virtual memory of the marketplace process", &self.virtual_bytes),
            ("host_available_memory_bytes", "Memory available on the host", &self.host_available_bytes),
            ("process_threads", "Threads owned by the marketplace process", &self.threads),
            ("host_cpu_usage_percent", "Global cpu usage of the host", &self.cpu_usage_percent),
            ("process_start_time_seconds", "Start time of the process since unix epoch in seconds", &self.start_time),
        ];
        for (name, help, gauge) in gauges {
            registry.register(name, help, gauge.clone());
        }
    }

    pub fn refresh(&self, sys: &mut System) {
        sys.refresh_all();
        self.host_available_bytes.set(sys.available_memory() as i64);
        self.cpu_usage_percent.set(sys.global_cpu_usage().round() as i64);

        let pid = sysinfo::Pid::from_u32(std::process::id());
        if let Some(process) = sys.process(pid) {
            self.resident_bytes.set(process.memory() as i64);
            self.virtual_bytes.set(process.virtual_memory() as i64);
        }
        if let Some(threads) = process_threads() {
            self.threads.set(threads);
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ])
            }),
        }
    }

    /// Registers the counter and histogram as `{service}_request_counter` and
    /// `{service}_request_duration`.
    pub fn register(&self, registry: &mut Registry, service: &str) {
        registry.register(
            format!("{service}_request_counter"),
            format!("Total number of requests to the {service}"),
            self.request_counter.clone(),
        );
        registry.register(
            format!("{service}_request_duration"),
            format!("Histogram of request durations for the {service}"),
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }

    /// Logs the outcome of `operation` and records it against `method`.
    pub fn complete<T, E: Display>(
        &self,
        method: Method,
        operation: &str,
        started: Instant,
        result: &Result<T, E>,
    ) {
        let elapsed = started.elapsed().as_secs_f64();

        let status = match result {
            Ok(_) => {
                info!("✅ {operation} completed in {elapsed:.3}s");
                Status::Success
            }
            Err(err) => {
                error!("❌ {operation} failed: {err}");
                Status::Error
            }
        };

        self.record(method, status, elapsed);
    }
}

/// Refreshes the process gauges every 15 seconds for the lifetime of the server.
pub async fn run_metrics_collector(system_metrics: Arc<SystemMetrics>) {
    let mut sys = System::new();
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(15));
    loop {
        interval.tick().await;
        system_metrics.refresh(&mut sys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn completed_operations_show_up_in_the_registry() {
        let mut registry = Registry::default();
        let metrics = Metrics::new();
        metrics.register(&mut registry, "rfq_service");

        let ok: Result<(), String> = Ok(());
        let failed: Result<(), String> = Err("boom".into());
        metrics.complete(Method::Post, "CreateRfq", Instant::now(), &ok);
        metrics.complete(Method::Post, "CreateRfq", Instant::now(), &failed);

        let mut out = String::new();
        encode(&mut out, &registry).unwrap();

        assert!(out.contains("rfq_service_request_counter_total"));
        assert!(out.contains("status=\"Success\""));
        assert!(out.contains("status=\"Error\""));
    }

    #[test]
    fn process_gauges_register_with_start_time() {
        let mut registry = Registry::default();
        SystemMetrics::new().register(&mut registry);

        let mut out = String::new();
        encode(&mut out, &registry).unwrap();

        assert!(out.contains("process_start_time_seconds"));
        assert!(out.contains("host_available_memory_bytes"));
        assert!(!out.contains("process_start_time_seconds 0\n"));
    }
}
