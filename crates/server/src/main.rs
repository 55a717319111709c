// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP surface for the SwimSched scheduling engine.
//!
//! A thin JSON mapping over the api crate's operations. Identity resolution
//! is external: mutating requests carry an already-resolved staff id and
//! role, and the server forwards them as a [`ResolvedStaff`] without
//! authenticating anything itself. Change descriptions returned by mutations
//! are logged here for the audit collaborator to pick up.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};

use swim_sched_api::{
    ApiError, BookMakeUpRequest, BookTrialRequest, ChangeDescription,
    CreateTermScheduleRequest, DailyScheduleRequest, MakeUpAvailabilityRequest, ResolvedStaff,
    ScheduleSlotRequest, StaffRole, TransferEnrollmentRequest, book_make_up, book_trial,
    check_make_up_availability, create_term_with_schedule, get_daily_schedule,
    get_schedule_slot, transfer_enrollment,
};
use swim_sched_persistence::Persistence;

/// SwimSched Server - HTTP server for the SwimSched scheduling engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone the school's schedule calendar is anchored to
    #[arg(short, long, default_value = "America/Chicago")]
    timezone: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer behind every operation.
    persistence: Arc<Mutex<Persistence>>,
    /// The school's civil timezone.
    timezone: chrono_tz::Tz,
}

/// Resolved-identity fields carried by every mutating request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorFields {
    /// The acting staff member's canonical id.
    staff_id: i64,
    /// The acting staff member's role (admin, instructor, front-desk).
    staff_role: String,
}

impl ActorFields {
    fn resolve(&self) -> Result<ResolvedStaff, ApiError> {
        let role = StaffRole::from_str(&self.staff_role).map_err(|message| {
            ApiError::InvalidInput {
                field: String::from("staff_role"),
                message,
            }
        })?;
        Ok(ResolvedStaff::new(self.staff_id, role))
    }
}

/// API request for creating a term with its schedule.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateTermApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    #[serde(flatten)]
    request: CreateTermScheduleRequest,
}

/// API request for booking a make-up seat.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BookMakeUpApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    #[serde(flatten)]
    request: BookMakeUpRequest,
}

/// API request for booking a trial seat.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BookTrialApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    #[serde(flatten)]
    request: BookTrialRequest,
}

/// API request for transferring an enrollment.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TransferApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    #[serde(flatten)]
    request: TransferEnrollmentRequest,
}

/// Maps an API error onto an HTTP response.
fn error_response(err: &ApiError) -> Response {
    let status = match err {
        ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::Conflict { .. } => StatusCode::CONFLICT,
        ApiError::Contention { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = serde_json::json!({ "error": err.to_string() });
    (status, Json(body)).into_response()
}

/// Logs a change description for the external audit collaborator.
fn log_change(change: &ChangeDescription) {
    info!(
        operation = %change.operation,
        entity = %change.entity,
        entity_id = change.entity_id,
        actor_staff_id = change.actor_staff_id,
        summary = %change.summary,
        "Change recorded"
    );
}

async fn health() -> &'static str {
    "ok"
}

async fn create_term_handler(
    AxumState(state): AxumState<AppState>,
    Json(payload): Json<CreateTermApiRequest>,
) -> Response {
    let actor = match payload.actor.resolve() {
        Ok(actor) => actor,
        Err(err) => return error_response(&err),
    };
    let mut persistence = state.persistence.lock().await;
    match create_term_with_schedule(&mut persistence, &payload.request, &actor) {
        Ok(outcome) => {
            log_change(&outcome.change);
            (StatusCode::CREATED, Json(outcome.response)).into_response()
        }
        Err(err) => {
            error!(%err, "Term creation failed");
            error_response(&err)
        }
    }
}

async fn schedule_slot_handler(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ScheduleSlotRequest>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    match get_schedule_slot(&mut persistence, &query) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn daily_schedule_handler(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<DailyScheduleRequest>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    match get_daily_schedule(&mut persistence, &query) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn availability_handler(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<MakeUpAvailabilityRequest>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    match check_make_up_availability(&mut persistence, &query) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn book_make_up_handler(
    AxumState(state): AxumState<AppState>,
    Json(payload): Json<BookMakeUpApiRequest>,
) -> Response {
    let actor = match payload.actor.resolve() {
        Ok(actor) => actor,
        Err(err) => return error_response(&err),
    };
    let mut persistence = state.persistence.lock().await;
    match book_make_up(&mut persistence, &payload.request, &actor) {
        Ok(outcome) => {
            log_change(&outcome.change);
            (StatusCode::CREATED, Json(outcome.response)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

async fn book_trial_handler(
    AxumState(state): AxumState<AppState>,
    Json(payload): Json<BookTrialApiRequest>,
) -> Response {
    let actor = match payload.actor.resolve() {
        Ok(actor) => actor,
        Err(err) => return error_response(&err),
    };
    let mut persistence = state.persistence.lock().await;
    match book_trial(&mut persistence, &payload.request, &actor) {
        Ok(outcome) => {
            log_change(&outcome.change);
            (StatusCode::CREATED, Json(outcome.response)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

async fn transfer_handler(
    AxumState(state): AxumState<AppState>,
    Json(payload): Json<TransferApiRequest>,
) -> Response {
    let actor = match payload.actor.resolve() {
        Ok(actor) => actor,
        Err(err) => return error_response(&err),
    };
    let mut persistence = state.persistence.lock().await;
    match transfer_enrollment(&mut persistence, &payload.request, &actor, state.timezone) {
        Ok(outcome) => {
            log_change(&outcome.change);
            Json(outcome.response).into_response()
        }
        Err(err) => {
            error!(%err, "Transfer failed");
            error_response(&err)
        }
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/terms/schedule", post(create_term_handler))
        .route("/schedule/slot", get(schedule_slot_handler))
        .route("/schedule/day", get(daily_schedule_handler))
        .route("/bookings/make-up/availability", get(availability_handler))
        .route("/bookings/make-up", post(book_make_up_handler))
        .route("/bookings/trial", post(book_trial_handler))
        .route("/enrollments/transfer", post(transfer_handler))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let timezone: chrono_tz::Tz = args
        .timezone
        .parse()
        .map_err(|_| format!("Unknown IANA timezone: {}", args.timezone))?;

    let persistence = match &args.database {
        Some(path) => {
            info!(path = %path, "Opening file database");
            Persistence::new_with_file(path)?
        }
        None => {
            info!("Using in-memory database");
            Persistence::new_in_memory()?
        }
    };

    let state = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        timezone,
    };

    let addr = format!("0.0.0.0:{}", args.port);
    info!(addr = %addr, timezone = %args.timezone, "Starting SwimSched server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
