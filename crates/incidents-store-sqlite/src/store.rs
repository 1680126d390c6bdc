//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use incidents_core::{
  customer::{Customer, Pagination},
  incident::{Incident, IncidentPatch},
  store::RecordStore,
};

use crate::{
  Result,
  encode::{INCIDENT_COLUMNS, RawIncident, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An incident store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_incident(&self, id: Uuid) -> Result<Option<Incident>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawIncident> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {INCIDENT_COLUMNS} FROM incidents WHERE id = ?1"),
            rusqlite::params![id_str],
            RawIncident::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIncident::into_incident).transpose()
  }
}

fn customer_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Customer> {
  Ok(Customer {
    id:         row.get(0)?,
    first_name: row.get(1)?,
    last_name:  row.get(2)?,
    name:       row.get(3)?,
    email:      row.get(4)?,
    phone:      row.get(5)?,
  })
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  // ── Incidents ─────────────────────────────────────────────────────────────

  async fn insert_incidents(&self, incidents: Vec<Incident>) -> Result<Vec<Incident>> {
    let rows: Vec<_> = incidents
      .iter()
      .map(|i| {
        (
          encode_uuid(i.id),
          i.title.clone(),
          i.urgency.map(|u| u.code()),
          i.status.map(|s| s.code()),
          i.customer_id.clone(),
        )
      })
      .collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO incidents (id, title, urgency, status, customer_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          for (id, title, urgency, status, customer_id) in rows {
            stmt.execute(rusqlite::params![id, title, urgency, status, customer_id])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(count = incidents.len(), "inserted incidents");
    Ok(incidents)
  }

  async fn get_incident(&self, id: Uuid) -> Result<Option<Incident>> {
    self.select_incident(id).await
  }

  async fn update_incident(
    &self,
    id:    Uuid,
    patch: IncidentPatch,
  ) -> Result<Option<Incident>> {
    let id_str      = encode_uuid(id);
    let title       = patch.title;
    let urgency     = patch.urgency.map(|u| u.code());
    let status      = patch.status.map(|s| s.code());
    let customer_id = patch.customer_id;

    // Absent patch fields bind as NULL and keep the stored value.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE incidents SET
             title       = COALESCE(?2, title),
             urgency     = COALESCE(?3, urgency),
             status      = COALESCE(?4, status),
             customer_id = COALESCE(?5, customer_id)
           WHERE id = ?1",
          rusqlite::params![id_str, title, urgency, status, customer_id],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.select_incident(id).await
  }

  async fn list_incidents(&self) -> Result<Vec<Incident>> {
    let raws: Vec<RawIncident> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {INCIDENT_COLUMNS} FROM incidents ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], RawIncident::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawIncident::into_incident).collect()
  }

  // ── Customers ─────────────────────────────────────────────────────────────

  async fn get_customer(&self, id: &str) -> Result<Option<Customer>> {
    let id = id.to_owned();

    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(conn
            .query_row(
              "SELECT id, first_name, last_name, name, email, phone
               FROM customers WHERE id = ?1",
              rusqlite::params![id],
              customer_from_row,
            )
            .optional()?)
        })
        .await?,
    )
  }

  async fn upsert_customer(&self, customer: Customer) -> Result<()> {
    let id = customer.id.clone();

    // Every column is overwritten: unset fields become NULL.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO customers (id, first_name, last_name, name, email, phone)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT(id) DO UPDATE SET
             first_name = excluded.first_name,
             last_name  = excluded.last_name,
             name       = excluded.name,
             email      = excluded.email,
             phone      = excluded.phone",
          rusqlite::params![
            customer.id,
            customer.first_name,
            customer.last_name,
            customer.name,
            customer.email,
            customer.phone,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(customer_id = %id, "upserted customer");
    Ok(())
  }

  async fn list_customers(&self, page: Pagination) -> Result<Vec<Customer>> {
    // SQLite treats a negative LIMIT as "no limit".
    let limit  = page.limit.map_or(-1, |l| l as i64);
    let offset = page.offset as i64;

    Ok(
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(
            "SELECT id, first_name, last_name, name, email, phone
             FROM customers ORDER BY id LIMIT ?1 OFFSET ?2",
          )?;
          let rows = stmt
            .query_map(rusqlite::params![limit, offset], customer_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?,
    )
  }
}
