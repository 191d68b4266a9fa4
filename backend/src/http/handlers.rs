//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. The upstream auth gateway establishes caller
//! identity and forwards it in request headers; handlers only translate
//! those headers into a [`CallerIdentity`].

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use uuid::Uuid;

use super::dto::{
    AvailableSlotsQuery, AvailableSlotsResponse, BlockDto, BlockListResponse, CreateBlockRequest,
    CreateBlockResponse, HealthResponse, SaveScheduleRequest, SaveScheduleResponse,
    ScheduleEntryDto, WeeklyScheduleResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{BlockId, ProfessionalId, TenantId, UserId};
use crate::db::services::{self, SlotQuery};
use crate::scheduler::availability::DEFAULT_STEP_MINUTES;
use crate::scheduler::policy::CallerIdentity;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Identity & Tenant Extraction
// =============================================================================

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, AppError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Header {} is not valid UTF-8", name))),
    }
}

fn parse_id_header(headers: &HeaderMap, name: &str) -> Result<Option<i64>, AppError> {
    match header_value(headers, name)? {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Header {} must be an integer id", name))),
    }
}

/// Extract the tenant from the `X-Tenant-Id` header.
fn tenant_from_headers(headers: &HeaderMap) -> Result<TenantId, AppError> {
    parse_id_header(headers, "x-tenant-id")?
        .map(TenantId)
        .ok_or_else(|| AppError::BadRequest("Missing X-Tenant-Id header".to_string()))
}

/// Reconstruct the caller identity installed by the auth gateway.
///
/// A service credential arrives as an `X-Api-Key` UUID; a staff user as
/// `X-User-Id` plus optional `X-User-Admin` and `X-User-Professional-Id`.
fn caller_from_headers(headers: &HeaderMap) -> Result<CallerIdentity, AppError> {
    if let Some(key) = header_value(headers, "x-api-key")? {
        let credential_id = Uuid::parse_str(key)
            .map_err(|_| AppError::BadRequest("X-Api-Key must be a UUID".to_string()))?;
        return Ok(CallerIdentity::ServiceCredential { credential_id });
    }

    let user_id = parse_id_header(headers, "x-user-id")?
        .map(UserId)
        .ok_or_else(|| AppError::Forbidden("Missing caller identity".to_string()))?;

    let is_admin = matches!(
        header_value(headers, "x-user-admin")?,
        Some("1") | Some("true")
    );
    let linked_professional_id = parse_id_header(headers, "x-user-professional-id")?
        .map(ProfessionalId);

    Ok(CallerIdentity::User {
        user_id,
        is_admin,
        linked_professional_id,
    })
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and storage is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Availability
// =============================================================================

/// GET /v1/professionals/{professional_id}/available-slots
///
/// Compute bookable slot start times for one professional-date.
pub async fn get_available_slots(
    State(state): State<AppState>,
    Path(professional_id): Path<i64>,
    Query(query): Query<AvailableSlotsQuery>,
    headers: HeaderMap,
) -> HandlerResult<AvailableSlotsResponse> {
    let tenant_id = tenant_from_headers(&headers)?;
    let professional_id = ProfessionalId::new(professional_id);

    let slot_query = SlotQuery {
        date: query.date.clone(),
        duration_minutes: query.duration,
        step_minutes: query.step.unwrap_or(DEFAULT_STEP_MINUTES),
    };

    let slots =
        services::get_available_slots(state.repository.as_ref(), tenant_id, professional_id, &slot_query)
            .await?;

    let total = slots.len();
    Ok(Json(AvailableSlotsResponse {
        professional_id: professional_id.value(),
        date: query.date,
        slots,
        total,
    }))
}

// =============================================================================
// Weekly Schedule
// =============================================================================

/// GET /v1/professionals/{professional_id}/schedule
///
/// Read back a professional's weekly schedule.
pub async fn get_weekly_schedule(
    State(state): State<AppState>,
    Path(professional_id): Path<i64>,
    headers: HeaderMap,
) -> HandlerResult<WeeklyScheduleResponse> {
    let tenant_id = tenant_from_headers(&headers)?;
    let caller = caller_from_headers(&headers)?;
    let professional_id = ProfessionalId::new(professional_id);

    let entries =
        services::get_weekly_schedule(state.repository.as_ref(), tenant_id, &caller, professional_id)
            .await?;

    Ok(Json(WeeklyScheduleResponse {
        professional_id: professional_id.value(),
        entries: entries.into_iter().map(ScheduleEntryDto::from).collect(),
    }))
}

/// PUT /v1/professionals/{professional_id}/schedule
///
/// Replace a professional's entire weekly schedule.
pub async fn save_weekly_schedule(
    State(state): State<AppState>,
    Path(professional_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<SaveScheduleRequest>,
) -> HandlerResult<SaveScheduleResponse> {
    let tenant_id = tenant_from_headers(&headers)?;
    let caller = caller_from_headers(&headers)?;
    let professional_id = ProfessionalId::new(professional_id);

    let saved = services::save_weekly_schedule(
        state.repository.as_ref(),
        tenant_id,
        &caller,
        professional_id,
        &request.entries,
    )
    .await?;

    Ok(Json(SaveScheduleResponse { saved }))
}

// =============================================================================
// Blocks
// =============================================================================

/// GET /v1/professionals/{professional_id}/blocks
///
/// List a professional's blocks, optionally restricted to a date window.
pub async fn list_blocks(
    State(state): State<AppState>,
    Path(professional_id): Path<i64>,
    Query(query): Query<super::dto::ListBlocksQuery>,
    headers: HeaderMap,
) -> HandlerResult<BlockListResponse> {
    let tenant_id = tenant_from_headers(&headers)?;
    let caller = caller_from_headers(&headers)?;
    let professional_id = ProfessionalId::new(professional_id);

    let blocks = services::list_blocks(
        state.repository.as_ref(),
        tenant_id,
        &caller,
        professional_id,
        query.from.as_deref(),
        query.to.as_deref(),
    )
    .await?;

    let blocks: Vec<BlockDto> = blocks.into_iter().map(Into::into).collect();
    let total = blocks.len();
    Ok(Json(BlockListResponse { blocks, total }))
}

/// POST /v1/professionals/{professional_id}/blocks
///
/// Create an ad-hoc unavailability block.
pub async fn create_block(
    State(state): State<AppState>,
    Path(professional_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<CreateBlockRequest>,
) -> Result<(axum::http::StatusCode, Json<CreateBlockResponse>), AppError> {
    let tenant_id = tenant_from_headers(&headers)?;
    let caller = caller_from_headers(&headers)?;
    let professional_id = ProfessionalId::new(professional_id);

    let block_id = services::create_block(
        state.repository.as_ref(),
        tenant_id,
        &caller,
        professional_id,
        &request.start_datetime,
        &request.end_datetime,
        request.reason,
    )
    .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(CreateBlockResponse {
            block_id: block_id.value(),
        }),
    ))
}

/// DELETE /v1/blocks/{block_id}
///
/// Delete a block by id.
pub async fn delete_block(
    State(state): State<AppState>,
    Path(block_id): Path<i64>,
    headers: HeaderMap,
) -> Result<axum::http::StatusCode, AppError> {
    let tenant_id = tenant_from_headers(&headers)?;
    let caller = caller_from_headers(&headers)?;

    services::delete_block(
        state.repository.as_ref(),
        tenant_id,
        &caller,
        BlockId::new(block_id),
    )
    .await?;

    Ok(axum::http::StatusCode::NO_CONTENT)
}
