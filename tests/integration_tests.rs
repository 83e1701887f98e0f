//! Integration tests for the notification service with the tick driver.
//!
//! These tests run on tokio's paused clock, so timings are deterministic:
//! - Auto-removal after the configured duration
//! - Default duration and kind coercion
//! - Pause/resume shifting the deadline by the paused time
//! - Independent lifecycles and stable ordering

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::{sleep, Duration, Instant};

use toastline::config::ToastConfig;
use toastline::scheduler::{spawn_driver, DriverHandle, MonotonicClock, TimerEvent};
use toastline::service::NotificationService;
use toastline::types::{NotificationId, NotificationKind};

// ============================================================================
// Test Helpers
// ============================================================================

/// Tick interval used by every test here.
const TICK_MS: u64 = 50;

/// Creates a service on tokio's clock with a running driver.
fn create_service() -> (
    Arc<NotificationService>,
    mpsc::UnboundedReceiver<TimerEvent>,
    DriverHandle,
) {
    let config = ToastConfig::default().with_tick_interval_ms(TICK_MS);
    let (service, rx) = NotificationService::with_events(config, Arc::new(MonotonicClock::new()));
    let service = Arc::new(service);
    let driver = spawn_driver(&service).unwrap();
    (service, rx, driver)
}

/// Waits until the id is gone and returns how long that took.
async fn time_until_removed(service: &NotificationService, id: NotificationId) -> Duration {
    let start = Instant::now();
    while service.get(id).is_some() {
        sleep(Duration::from_millis(1)).await;
    }
    start.elapsed()
}

fn assert_within_quantum(actual: Duration, expected_ms: u64) {
    let actual_ms = actual.as_millis() as u64;
    assert!(
        actual_ms >= expected_ms && actual_ms <= expected_ms + TICK_MS,
        "expected removal in [{}, {}]ms, got {}ms",
        expected_ms,
        expected_ms + TICK_MS,
        actual_ms
    );
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn scenario_success_toast_expires_after_duration() {
    let (service, _rx, _driver) = create_service();

    let id = service.enqueue("success", "Saved", Some(1000));
    let items = service.list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].progress_percent(), 100.0);

    let elapsed = time_until_removed(&service, id).await;
    assert_within_quantum(elapsed, 1000);
}

#[tokio::test(start_paused = true)]
async fn scenario_default_duration() {
    let (service, _rx, _driver) = create_service();

    let id = service.enqueue("info", "Loading", None);
    assert_eq!(service.get(id).unwrap().duration_ms, 3000);

    let elapsed = time_until_removed(&service, id).await;
    assert_within_quantum(elapsed, 3000);
}

#[tokio::test(start_paused = true)]
async fn scenario_hover_delays_removal() {
    let (service, _rx, _driver) = create_service();

    let id = service.enqueue("success", "Saved", Some(1000));
    service.report_interaction_start(id);
    sleep(Duration::from_millis(500)).await;
    assert_eq!(service.progress(id), Some(100.0));
    service.report_interaction_end(id);

    let elapsed = time_until_removed(&service, id).await;
    assert_within_quantum(elapsed + Duration::from_millis(500), 1500);
}

#[tokio::test(start_paused = true)]
async fn scenario_close_first_of_two() {
    let (service, _rx, _driver) = create_service();

    let a = service.enqueue("info", "A", None);
    let b = service.enqueue("info", "B", None);
    service.close(a);

    let ids: Vec<_> = service.list().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![b]);
}

#[tokio::test(start_paused = true)]
async fn scenario_close_unknown_id() {
    let (service, _rx, _driver) = create_service();
    service.enqueue("info", "keep", None);
    let before = service.list();

    let unknown = "toast-999999".parse::<NotificationId>().unwrap();
    service.close(unknown);

    assert_eq!(service.list(), before);
}

#[tokio::test(start_paused = true)]
async fn scenario_bogus_kind_becomes_info() {
    let (service, _rx, _driver) = create_service();

    let id = service.enqueue("bogus-kind", "x", None);
    assert_eq!(service.get(id).unwrap().kind, NotificationKind::Info);
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test(start_paused = true)]
async fn pause_shifts_removal_by_paused_time() {
    let (service, _rx, _driver) = create_service();

    let plain = service.enqueue("info", "plain", Some(1000));
    let hovered = service.enqueue("info", "hovered", Some(1000));

    sleep(Duration::from_millis(200)).await;
    service.report_interaction_start(hovered);
    sleep(Duration::from_millis(700)).await;
    service.report_interaction_end(hovered);

    // 900ms in: plain has 100ms left, hovered has 800ms left.
    let plain_left = time_until_removed(&service, plain).await;
    assert!(plain_left.as_millis() as u64 <= 100 + TICK_MS);
    assert!(service.get(hovered).is_some());

    let hovered_left = time_until_removed(&service, hovered).await + plain_left;
    assert_within_quantum(hovered_left, 800);
}

#[tokio::test(start_paused = true)]
async fn progress_is_monotonic_while_running_and_flat_while_paused() {
    let (service, _rx, _driver) = create_service();
    let id = service.enqueue("warning", "Careful", Some(2000));

    let mut last = 100.0;
    for _ in 0..5 {
        sleep(Duration::from_millis(100)).await;
        let p = service.progress(id).unwrap();
        assert!(p <= last);
        last = p;
    }

    service.report_interaction_start(id);
    let frozen = service.progress(id).unwrap();
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(service.progress(id), Some(frozen));
    assert!(service.get(id).unwrap().paused);
}

#[tokio::test(start_paused = true)]
async fn independent_lifecycles() {
    let (service, _rx, _driver) = create_service();

    let short = service.enqueue("success", "short", Some(300));
    let long = service.enqueue("error", "long", Some(2000));

    let elapsed = time_until_removed(&service, short).await;
    assert_within_quantum(elapsed, 300);

    let item = service.get(long).unwrap();
    assert!(!item.paused);
    assert!(service.progress(long).unwrap() > 70.0);

    service.close(long);
    assert!(service.is_empty());
}

#[tokio::test(start_paused = true)]
async fn order_is_stable_across_removals() {
    let (service, _rx, _driver) = create_service();

    let a = service.enqueue("info", "a", Some(5000));
    let b = service.enqueue("info", "b", Some(200));
    let c = service.enqueue("info", "c", Some(5000));
    let d = service.enqueue("info", "d", Some(5000));

    time_until_removed(&service, b).await;
    service.close(c);

    let ids: Vec<_> = service.list().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![a, d]);
}

#[tokio::test(start_paused = true)]
async fn close_races_with_expiry() {
    let (service, mut rx, _driver) = create_service();

    let id = service.enqueue("info", "x", Some(100));
    time_until_removed(&service, id).await;
    service.close(id);
    service.report_interaction_start(id);
    service.report_interaction_end(id);

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(
        events,
        vec![
            TimerEvent::Created {
                id,
                duration_ms: 100
            },
            TimerEvent::Expired { id },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_full_snapshots() {
    let (service, _rx, _driver) = create_service();
    let seen: Arc<Mutex<Vec<usize>>> = Arc::default();

    let sink = Arc::clone(&seen);
    let subscription = service.subscribe(move |items| {
        sink.lock().unwrap().push(items.len());
    });

    let a = service.enqueue("info", "a", Some(100));
    service.enqueue("info", "b", Some(100));
    time_until_removed(&service, a).await;
    subscription.unsubscribe();
    service.enqueue("info", "c", Some(100));

    // initial, +a, +b, then a and b expire on the same tick
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 0]);
}
