//! Handlers for `/incidents` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`   | `/incidents` | All incidents in creation order |
//! | `POST`  | `/incidents` | Body: one [`NewIncident`] or an array; returns 201 + stored rows |
//! | `GET`   | `/incidents/:id` | 404 if not found |
//! | `PATCH` | `/incidents/:id` | Body: [`IncidentPatch`]; 409 if the incident is closed |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use incidents_core::{
  incident::{Incident, IncidentPatch, NewIncident},
  store::RecordStore,
};
use incidents_processor::ProcessorService;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /incidents`
pub async fn list<S>(
  State(svc): State<Arc<ProcessorService<S>>>,
) -> Result<Json<Vec<Incident>>, ApiError>
where
  S: RecordStore + 'static,
{
  Ok(Json(svc.list_incidents().await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /incidents/:id`
pub async fn get_one<S>(
  State(svc): State<Arc<ProcessorService<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Incident>, ApiError>
where
  S: RecordStore + 'static,
{
  Ok(Json(svc.get_incident(id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /incidents` accepts a single incident or a batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateBody {
  Many(Vec<NewIncident>),
  One(NewIncident),
}

impl CreateBody {
  fn into_vec(self) -> Vec<NewIncident> {
    match self {
      Self::Many(v) => v,
      Self::One(one) => vec![one],
    }
  }
}

/// `POST /incidents` — returns 201 + the stored incidents.
pub async fn create<S>(
  State(svc): State<Arc<ProcessorService<S>>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let created = svc.create_incidents(body.into_vec()).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /incidents/:id`
pub async fn update<S>(
  State(svc): State<Arc<ProcessorService<S>>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<IncidentPatch>,
) -> Result<Json<Incident>, ApiError>
where
  S: RecordStore + 'static,
{
  Ok(Json(svc.update_incident(id, patch).await?))
}
