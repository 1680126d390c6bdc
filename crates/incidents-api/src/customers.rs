//! Handler for `GET /customers`.
//!
//! Paging accepts the OData options `$top` / `$skip` or the plain aliases
//! `limit` / `offset`. The body mirrors an OData collection:
//! `{"value": [...], "@count": n}`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use incidents_core::{
  customer::{Customer, Pagination},
  store::RecordStore,
};
use incidents_processor::ProcessorService;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  #[serde(rename = "$top", alias = "limit")]
  pub top:  Option<usize>,
  #[serde(rename = "$skip", alias = "offset")]
  pub skip: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CustomerList {
  pub value: Vec<Customer>,
  #[serde(rename = "@count")]
  pub count: usize,
}

/// `GET /customers[?$top=...][&$skip=...]`
pub async fn list<S>(
  State(svc): State<Arc<ProcessorService<S>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<CustomerList>, ApiError>
where
  S: RecordStore + 'static,
{
  let page = svc
    .read_customers(Pagination {
      limit:  params.top,
      offset: params.skip.unwrap_or(0),
    })
    .await?;
  Ok(Json(CustomerList {
    value: page.rows,
    count: page.total,
  }))
}
