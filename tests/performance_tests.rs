//! Performance Tests for the toast registry.
//!
//! - TC-P-001: enqueue throughput
//! - TC-P-002: tick cost with many active toasts
//! - TC-P-003: CLI argument parsing time
//! - TC-P-004: tick cost with a large registry
//!
//! Note: These tests may be flaky under heavy system load.

use std::sync::Arc;
use std::time::{Duration, Instant};

use toastline::config::ToastConfig;
use toastline::scheduler::ManualClock;
use toastline::service::NotificationService;

// ============================================================================
// Test Helpers
// ============================================================================

/// Performance measurement result.
#[derive(Debug)]
struct PerfResult {
    operation: String,
    duration_ms: u128,
    target_ms: u128,
    passed: bool,
}

impl PerfResult {
    fn new(operation: &str, duration: Duration, target_ms: u128) -> Self {
        let duration_ms = duration.as_millis();
        Self {
            operation: operation.to_string(),
            duration_ms,
            target_ms,
            passed: duration_ms <= target_ms,
        }
    }

    fn assert_passed(&self) {
        eprintln!(
            "Performance: {} completed in {}ms (target: {}ms)",
            self.operation, self.duration_ms, self.target_ms
        );
        assert!(
            self.passed,
            "Performance test failed: {} took {}ms (target: {}ms)",
            self.operation, self.duration_ms, self.target_ms
        );
    }
}

fn create_service() -> (NotificationService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let service = NotificationService::with_clock(ToastConfig::default(), clock.clone());
    (service, clock)
}

// ============================================================================
// TC-P-001: Enqueue Throughput
// ============================================================================

#[test]
fn tc_p_001_enqueue_throughput() {
    let (service, _clock) = create_service();

    let start = Instant::now();
    for i in 0..1000 {
        service.enqueue("info", format!("toast {i}"), Some(10_000));
    }
    let result = PerfResult::new("1000 enqueues", start.elapsed(), 1000);

    assert_eq!(service.len(), 1000);
    result.assert_passed();
}

// ============================================================================
// TC-P-002: Tick Cost
// ============================================================================

#[test]
fn tc_p_002_tick_with_many_active_toasts() {
    let (service, clock) = create_service();
    for i in 0..1000 {
        let duration = if i % 2 == 0 { 500 } else { 10_000 };
        service.enqueue("info", format!("toast {i}"), Some(duration));
    }

    clock.advance(100);
    let start = Instant::now();
    let expired = service.tick();
    let result = PerfResult::new("tick over 1000 toasts", start.elapsed(), 500);

    assert!(expired.is_empty());
    result.assert_passed();

    clock.advance(400);
    let start = Instant::now();
    let expired = service.tick();
    let result = PerfResult::new("tick expiring 500 toasts", start.elapsed(), 500);

    assert_eq!(expired.len(), 500);
    assert_eq!(service.len(), 500);
    result.assert_passed();
}

// ============================================================================
// TC-P-003: CLI Argument Parsing
// ============================================================================

#[test]
fn tc_p_003_cli_argument_parsing_time() {
    use clap::Parser;
    use toastline::cli::commands::Cli;

    let start = Instant::now();
    let _ = Cli::try_parse_from(["toastline", "show", "--kind", "success"]);
    let result = PerfResult::new("CLI argument parsing", start.elapsed(), 100);

    result.assert_passed();
}

// ============================================================================
// TC-P-004: Tick Cost With a Large Registry
// ============================================================================

#[test]
fn tc_p_004_tick_scales_with_large_registry() {
    let (service, clock) = create_service();
    for i in 0..20_000 {
        service.enqueue("info", format!("toast {i}"), Some(60_000));
    }

    clock.advance(10);
    let start = Instant::now();
    for _ in 0..10 {
        service.tick();
    }
    let result = PerfResult::new("10 ticks over 20000 toasts", start.elapsed(), 1000);

    assert_eq!(service.len(), 20_000);
    result.assert_passed();
}
