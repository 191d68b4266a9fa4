use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use vetsched_rust::api::{BlockId, ProfessionalId, TenantId};
use vetsched_rust::models::schedule::{
    AppointmentOccupancy, AppointmentStatus, ScheduleBlock,
};
use vetsched_rust::models::time::DayMinute;
use vetsched_rust::scheduler::availability::compute_available_slots;

fn target_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

fn make_blocks(count: usize) -> Vec<ScheduleBlock> {
    let midnight = target_date().and_hms_opt(0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let start = midnight + chrono::Duration::minutes((i * 90) as i64 % 1380);
            ScheduleBlock {
                id: BlockId(i as i64 + 1),
                tenant_id: TenantId(1),
                professional_id: ProfessionalId(1),
                start_datetime: start,
                end_datetime: start + chrono::Duration::minutes(20),
                reason: None,
            }
        })
        .collect()
}

fn make_appointments(count: usize) -> Vec<AppointmentOccupancy> {
    let midnight = target_date().and_hms_opt(0, 0, 0).unwrap();
    (0..count)
        .map(|i| AppointmentOccupancy {
            appointment_date: midnight + chrono::Duration::minutes((i * 45) as i64 % 1380),
            duration_minutes: Some(30),
            status: AppointmentStatus::Scheduled,
        })
        .collect()
}

fn bench_empty_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("availability");

    let start = DayMinute::parse("08:00").unwrap();
    let end = DayMinute::parse("20:00").unwrap();

    group.bench_function("empty_day", |b| {
        b.iter(|| {
            black_box(compute_available_slots(
                black_box(start),
                black_box(end),
                30,
                15,
                target_date(),
                &[],
                &[],
            ))
        });
    });

    group.finish();
}

fn bench_occupied_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("availability");

    let start = DayMinute::parse("08:00").unwrap();
    let end = DayMinute::parse("20:00").unwrap();

    for count in [4usize, 16, 64] {
        let blocks = make_blocks(count);
        let appointments = make_appointments(count);
        group.bench_with_input(
            BenchmarkId::new("occupied_day", count),
            &count,
            |b, _| {
                b.iter(|| {
                    black_box(compute_available_slots(
                        black_box(start),
                        black_box(end),
                        30,
                        15,
                        target_date(),
                        &blocks,
                        &appointments,
                    ))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_empty_day, bench_occupied_day);
criterion_main!(benches);
