//! Performance benchmarks for the leave engine.
//!
//! Covers the hot paths of request validation: the working-day walk over
//! long ranges and overlap detection against a large request history.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::BTreeSet;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use leave_engine::clock::FixedClock;
use leave_engine::config::LeavePolicy;
use leave_engine::directory::InMemoryDirectory;
use leave_engine::engine::{has_overlap, working_days, CreateLeaveParams, LeaveEngine};
use leave_engine::models::{
    DurationKind, LeaveCategory, LeaveRequest, LeaveStatus, UserProfile, UserRole,
};
use leave_engine::notify::NullSink;
use leave_engine::store::MemoryStore;

fn make_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Twelve spread-out holidays, roughly one per month.
fn year_of_holidays() -> BTreeSet<NaiveDate> {
    (1..=12)
        .map(|month| NaiveDate::from_ymd_opt(2026, month, 15).unwrap())
        .collect()
}

/// A terminal-status history plus a handful of active requests, all for
/// one user, spread over several years.
fn request_history(count: usize) -> Vec<LeaveRequest> {
    let base = make_date("2020-01-06");
    (0..count)
        .map(|i| {
            let start = base + Duration::days((i * 7) as i64);
            let status = match i % 4 {
                0 => LeaveStatus::Rejected,
                1 => LeaveStatus::Cancelled,
                2 => LeaveStatus::Approved,
                _ => LeaveStatus::Pending,
            };
            LeaveRequest {
                id: Uuid::new_v4(),
                user_id: 1,
                start_date: start,
                end_date: start + Duration::days(2),
                days: Decimal::from(3),
                category: LeaveCategory::Casual,
                duration: DurationKind::Full,
                reason: None,
                status,
                rejection_reason: None,
                approved_by: None,
                approved_at: None,
                created_at: Utc::now(),
            }
        })
        .collect()
}

fn bench_working_days(c: &mut Criterion) {
    let holidays = year_of_holidays();
    let start = make_date("2026-01-01");

    let mut group = c.benchmark_group("working_days");
    for days in [5u64, 30, 365] {
        group.throughput(Throughput::Elements(days));
        group.bench_with_input(BenchmarkId::from_parameter(days), &days, |b, &days| {
            let end = start + Duration::days(days as i64 - 1);
            b.iter(|| working_days(black_box(start), black_box(end), black_box(&holidays)));
        });
    }
    group.finish();
}

fn bench_overlap_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_overlap");
    for count in [10usize, 100, 1000] {
        let history = request_history(count);
        // A candidate range past the whole history, so the scan never
        // short-circuits early.
        let last = history.last().map(|r| r.end_date).unwrap();
        let start = last + Duration::days(30);
        let end = start + Duration::days(4);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &history, |b, history| {
            b.iter(|| has_overlap(black_box(history.iter()), black_box(start), black_box(end)));
        });
    }
    group.finish();
}

fn bench_submission(c: &mut Criterion) {
    let engine = build_engine();

    // One submission per distinct week so validation sees a growing but
    // non-overlapping history; cancel immediately to keep the state small.
    let mut week = 0i64;
    c.bench_function("create_and_cancel_request", |b| {
        b.iter(|| {
            let start = make_date("2026-03-02") + Duration::days(week * 7);
            week += 1;
            let outcome = engine
                .create_request(CreateLeaveParams {
                    user_id: 1,
                    start_date: start,
                    end_date: start + Duration::days(1),
                    category: LeaveCategory::Sick,
                    reason: None,
                    is_half_day: false,
                    half_day_period: None,
                })
                .expect("submission should validate");
            engine
                .cancel(outcome.request.id, 1)
                .expect("cancel should succeed");
            black_box(outcome.request.id)
        });
    });
}

fn build_engine() -> LeaveEngine {
    // A huge sick entitlement so repeated benchmark submissions never run
    // out of balance.
    let mut policy = LeavePolicy::default();
    policy.entitlements.sick = Decimal::from(1_000_000);

    LeaveEngine::new(
        Arc::new(MemoryStore::new()),
        Arc::new(InMemoryDirectory::with_users(vec![UserProfile {
            id: 1,
            name: "Bench".to_string(),
            role: UserRole::Worker,
            manager_id: None,
        }])),
        Arc::new(NullSink),
        Arc::new(FixedClock::on_date(make_date("2026-03-02"))),
        policy,
    )
}

criterion_group!(
    benches,
    bench_working_days,
    bench_overlap_detection,
    bench_submission
);
criterion_main!(benches);
