use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::api::{BlockId, ProfessionalId, TenantId, UserId};
use crate::db::repositories::LocalRepository;
use crate::db::services::{self, ServiceError, SlotQuery};
use crate::models::schedule::{
    AppointmentOccupancy, AppointmentStatus, Professional, ScheduleEntryInput,
};
use crate::models::time::DayMinute;
use crate::scheduler::policy::CallerIdentity;

const TENANT: TenantId = TenantId(1);
const VET: ProfessionalId = ProfessionalId(10);

fn service_caller() -> CallerIdentity {
    CallerIdentity::ServiceCredential {
        credential_id: Uuid::new_v4(),
    }
}

fn staff_caller() -> CallerIdentity {
    CallerIdentity::User {
        user_id: UserId(900),
        is_admin: false,
        linked_professional_id: None,
    }
}

fn other_vet_caller() -> CallerIdentity {
    CallerIdentity::User {
        user_id: UserId(901),
        is_admin: false,
        linked_professional_id: Some(ProfessionalId(99)),
    }
}

fn clock(s: &str) -> DayMinute {
    DayMinute::parse(s).unwrap()
}

fn entry(day: i64, start: &str, end: &str, available: bool) -> ScheduleEntryInput {
    ScheduleEntryInput {
        day_of_week: day,
        start_time: clock(start),
        end_time: clock(end),
        is_available: available,
    }
}

fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Repository seeded with one professional whose Monday window is
/// 09:00-12:00. 2024-03-04 is a Monday (day-of-week 1).
async fn seeded_repo() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.add_professional(Professional {
        id: VET,
        tenant_id: TENANT,
        user_id: Some(UserId(500)),
        name: "Dr. Vega".to_string(),
    });

    services::save_weekly_schedule(
        &repo,
        TENANT,
        &service_caller(),
        VET,
        &[entry(1, "09:00", "12:00", true), entry(2, "09:00", "12:00", false)],
    )
    .await
    .unwrap();

    repo
}

// ==================== Availability ====================

#[tokio::test]
async fn test_available_slots_unobstructed() {
    let repo = seeded_repo().await;

    let slots = services::get_available_slots(&repo, TENANT, VET, &SlotQuery::new("2024-03-04", 30))
        .await
        .unwrap();

    assert_eq!(slots.len(), 11);
    assert_eq!(slots.first().map(String::as_str), Some("09:00"));
    assert_eq!(slots.last().map(String::as_str), Some("11:30"));
}

#[tokio::test]
async fn test_available_slots_exclude_appointments() {
    let repo = seeded_repo().await;
    repo.add_appointment(
        TENANT,
        VET,
        AppointmentOccupancy {
            appointment_date: datetime("2024-03-04 10:00:00"),
            duration_minutes: Some(30),
            status: AppointmentStatus::Confirmed,
        },
    );

    let slots = services::get_available_slots(&repo, TENANT, VET, &SlotQuery::new("2024-03-04", 30))
        .await
        .unwrap();

    assert!(!slots.contains(&"09:45".to_string()));
    assert!(!slots.contains(&"10:00".to_string()));
    assert!(!slots.contains(&"10:15".to_string()));
    assert!(slots.contains(&"09:30".to_string()));
    assert!(slots.contains(&"10:30".to_string()));
}

#[tokio::test]
async fn test_cancelled_appointments_do_not_block() {
    let repo = seeded_repo().await;
    for status in [
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
        AppointmentStatus::NoShow,
    ] {
        repo.add_appointment(
            TENANT,
            VET,
            AppointmentOccupancy {
                appointment_date: datetime("2024-03-04 09:00:00"),
                duration_minutes: Some(180),
                status,
            },
        );
    }

    let slots = services::get_available_slots(&repo, TENANT, VET, &SlotQuery::new("2024-03-04", 30))
        .await
        .unwrap();
    assert_eq!(slots.len(), 11);
}

#[tokio::test]
async fn test_blocks_exclude_slots() {
    let repo = seeded_repo().await;
    services::create_block(
        &repo,
        TENANT,
        &service_caller(),
        VET,
        "2024-03-04 09:00:00",
        "2024-03-04 09:30:00",
        Some("staff meeting".to_string()),
    )
    .await
    .unwrap();

    let slots = services::get_available_slots(&repo, TENANT, VET, &SlotQuery::new("2024-03-04", 30))
        .await
        .unwrap();
    assert_eq!(slots.first().map(String::as_str), Some("09:30"));
}

#[tokio::test]
async fn test_unavailable_day_short_circuits_without_queries() {
    let repo = seeded_repo().await;

    // 2024-03-05 is the Tuesday marked unavailable.
    let slots = services::get_available_slots(&repo, TENANT, VET, &SlotQuery::new("2024-03-05", 30))
        .await
        .unwrap();
    assert!(slots.is_empty());

    // 2024-03-06 (Wednesday) has no entry at all: same result.
    let slots = services::get_available_slots(&repo, TENANT, VET, &SlotQuery::new("2024-03-06", 30))
        .await
        .unwrap();
    assert!(slots.is_empty());

    // Neither query touched the block or appointment stores.
    assert_eq!(repo.block_query_count(), 0);
    assert_eq!(repo.appointment_query_count(), 0);
}

#[tokio::test]
async fn test_available_slots_idempotent() {
    let repo = seeded_repo().await;
    repo.add_appointment(
        TENANT,
        VET,
        AppointmentOccupancy {
            appointment_date: datetime("2024-03-04 09:45:00"),
            duration_minutes: None,
            status: AppointmentStatus::Scheduled,
        },
    );

    let query = SlotQuery::new("2024-03-04", 30);
    let first = services::get_available_slots(&repo, TENANT, VET, &query)
        .await
        .unwrap();
    let second = services::get_available_slots(&repo, TENANT, VET, &query)
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_date_rejected() {
    let repo = seeded_repo().await;

    for bad in ["04-03-2024", "2024/03/04", "tomorrow", ""] {
        let result =
            services::get_available_slots(&repo, TENANT, VET, &SlotQuery::new(bad, 30)).await;
        assert!(
            matches!(result, Err(ServiceError::Validation(_))),
            "expected Validation error for {:?}",
            bad
        );
    }
}

#[tokio::test]
async fn test_zero_duration_rejected() {
    let repo = seeded_repo().await;
    let result =
        services::get_available_slots(&repo, TENANT, VET, &SlotQuery::new("2024-03-04", 0)).await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn test_unknown_professional_not_found() {
    let repo = seeded_repo().await;
    let result = services::get_available_slots(
        &repo,
        TENANT,
        ProfessionalId(404),
        &SlotQuery::new("2024-03-04", 30),
    )
    .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_professional_invisible_across_tenants() {
    let repo = seeded_repo().await;
    let result = services::get_available_slots(
        &repo,
        TenantId(2),
        VET,
        &SlotQuery::new("2024-03-04", 30),
    )
    .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

// ==================== Weekly Schedule ====================

#[tokio::test]
async fn test_save_schedule_is_full_replace() {
    let repo = seeded_repo().await;
    assert_eq!(repo.entry_count(TENANT, VET), 2);

    // Saving a single Friday entry wipes the previous Monday/Tuesday rows.
    let inserted = services::save_weekly_schedule(
        &repo,
        TENANT,
        &staff_caller(),
        VET,
        &[entry(5, "08:00", "16:00", true)],
    )
    .await
    .unwrap();

    assert_eq!(inserted, 1);
    assert_eq!(repo.entry_count(TENANT, VET), 1);

    // Monday now has no entry, so it resolves to no slots.
    let slots = services::get_available_slots(&repo, TENANT, VET, &SlotQuery::new("2024-03-04", 30))
        .await
        .unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_out_of_range_day_skipped_not_rejected() {
    let repo = seeded_repo().await;

    let inserted = services::save_weekly_schedule(
        &repo,
        TENANT,
        &service_caller(),
        VET,
        &[
            entry(1, "09:00", "12:00", true),
            entry(7, "09:00", "12:00", true),
            entry(-1, "09:00", "12:00", true),
        ],
    )
    .await
    .unwrap();

    assert_eq!(inserted, 1);
}

#[tokio::test]
async fn test_available_entry_with_inverted_window_rejected() {
    let repo = seeded_repo().await;

    let result = services::save_weekly_schedule(
        &repo,
        TENANT,
        &service_caller(),
        VET,
        &[entry(1, "12:00", "09:00", true)],
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    // An unavailable day may carry any window; the times are ignored.
    let result = services::save_weekly_schedule(
        &repo,
        TENANT,
        &service_caller(),
        VET,
        &[entry(1, "12:00", "09:00", false)],
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_get_weekly_schedule_ordered() {
    let repo = seeded_repo().await;
    let entries = services::get_weekly_schedule(&repo, TENANT, &staff_caller(), VET)
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].day_of_week, 1);
    assert_eq!(entries[1].day_of_week, 2);
}

// ==================== Access Policy ====================

#[tokio::test]
async fn test_other_professional_cannot_edit() {
    let repo = seeded_repo().await;

    let result = services::save_weekly_schedule(
        &repo,
        TENANT,
        &other_vet_caller(),
        VET,
        &[entry(1, "09:00", "12:00", true)],
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));

    let result = services::get_weekly_schedule(&repo, TENANT, &other_vet_caller(), VET).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_own_professional_can_edit() {
    let repo = seeded_repo().await;
    let own = CallerIdentity::User {
        user_id: UserId(500),
        is_admin: false,
        linked_professional_id: Some(VET),
    };

    let result = services::save_weekly_schedule(
        &repo,
        TENANT,
        &own,
        VET,
        &[entry(1, "10:00", "14:00", true)],
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_caller_can_view_symmetry() {
    let repo = seeded_repo().await;
    let own = CallerIdentity::User {
        user_id: UserId(500),
        is_admin: false,
        linked_professional_id: Some(VET),
    };

    assert!(services::caller_can_view(&repo, TENANT, &own, VET)
        .await
        .unwrap());
    assert!(
        !services::caller_can_view(&repo, TENANT, &other_vet_caller(), VET)
            .await
            .unwrap()
    );
    assert!(
        services::caller_can_edit(&repo, TENANT, &staff_caller(), VET)
            .await
            .unwrap()
    );
}

// ==================== Blocks ====================

#[tokio::test]
async fn test_create_block_invalid_interval() {
    let repo = seeded_repo().await;

    let result = services::create_block(
        &repo,
        TENANT,
        &service_caller(),
        VET,
        "2024-03-04 10:00:00",
        "2024-03-04 10:00:00",
        None,
    )
    .await;
    assert!(matches!(result, Err(ServiceError::InvalidInterval(_))));

    let result = services::create_block(
        &repo,
        TENANT,
        &service_caller(),
        VET,
        "2024-03-04 10:00:00",
        "2024-03-04 09:00:00",
        None,
    )
    .await;
    assert!(matches!(result, Err(ServiceError::InvalidInterval(_))));
}

#[tokio::test]
async fn test_create_block_malformed_datetime() {
    let repo = seeded_repo().await;

    let result = services::create_block(
        &repo,
        TENANT,
        &service_caller(),
        VET,
        "2024-03-04T10:00:00",
        "2024-03-04 11:00:00",
        None,
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn test_delete_block_lifecycle() {
    let repo = seeded_repo().await;
    let block_id = services::create_block(
        &repo,
        TENANT,
        &staff_caller(),
        VET,
        "2024-03-04 09:00:00",
        "2024-03-04 10:00:00",
        None,
    )
    .await
    .unwrap();

    services::delete_block(&repo, TENANT, &staff_caller(), block_id)
        .await
        .unwrap();

    let result = services::delete_block(&repo, TENANT, &staff_caller(), block_id).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_block_access_checked_against_owner() {
    let repo = seeded_repo().await;
    let block_id = services::create_block(
        &repo,
        TENANT,
        &staff_caller(),
        VET,
        "2024-03-04 09:00:00",
        "2024-03-04 10:00:00",
        None,
    )
    .await
    .unwrap();

    let result = services::delete_block(&repo, TENANT, &other_vet_caller(), block_id).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_delete_block_wrong_tenant_not_found() {
    let repo = seeded_repo().await;
    let block_id = services::create_block(
        &repo,
        TENANT,
        &staff_caller(),
        VET,
        "2024-03-04 09:00:00",
        "2024-03-04 10:00:00",
        None,
    )
    .await
    .unwrap();

    let result = services::delete_block(&repo, TenantId(2), &staff_caller(), block_id).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_list_blocks_window_filter() {
    let repo = seeded_repo().await;
    services::create_block(
        &repo,
        TENANT,
        &staff_caller(),
        VET,
        "2024-03-04 09:00:00",
        "2024-03-04 10:00:00",
        None,
    )
    .await
    .unwrap();
    services::create_block(
        &repo,
        TENANT,
        &staff_caller(),
        VET,
        "2024-03-10 09:00:00",
        "2024-03-10 10:00:00",
        None,
    )
    .await
    .unwrap();

    let all = services::list_blocks(&repo, TENANT, &staff_caller(), VET, None, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let first_week = services::list_blocks(
        &repo,
        TENANT,
        &staff_caller(),
        VET,
        Some("2024-03-04"),
        Some("2024-03-05"),
    )
    .await
    .unwrap();
    assert_eq!(first_week.len(), 1);

    let unknown_block = services::delete_block(&repo, TENANT, &staff_caller(), BlockId(999)).await;
    assert!(matches!(unknown_block, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_health_check_passthrough() {
    let repo = LocalRepository::new();
    assert!(services::health_check(&repo).await.unwrap());
    repo.set_healthy(false);
    assert!(!services::health_check(&repo).await.unwrap());
}
