//! End-to-end handler tests against an in-memory SQLite store and a fake
//! partner gateway.

use std::{
  collections::HashSet,
  io,
  sync::{Arc, Mutex},
};

use incidents_core::{
  Error,
  customer::{Customer, Pagination},
  gateway::{PartnerExpand, PartnerGateway, PartnerQuery},
  incident::{IncidentPatch, NewIncident, Status, Urgency},
  partner::{Address, BusinessPartner, EmailAddress, PhoneNumber},
  store::RecordStore,
};
use incidents_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::{HandlerRegistry, ProcessorService};

// ─── Fakes ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeGateway {
  partners: Vec<BusinessPartner>,
  /// Lookups for these ids fail as if the remote service were down.
  failing:  HashSet<String>,
  queries:  Mutex<Vec<PartnerQuery>>,
}

impl FakeGateway {
  fn with(partners: Vec<BusinessPartner>) -> Self {
    Self {
      partners,
      ..Self::default()
    }
  }

  fn queries(&self) -> Vec<PartnerQuery> { self.queries.lock().unwrap().clone() }
}

impl PartnerGateway for FakeGateway {
  type Error = io::Error;

  async fn find(&self, query: &PartnerQuery) -> Result<Vec<BusinessPartner>, io::Error> {
    self.queries.lock().unwrap().push(query.clone());

    if let Some(id) = &query.id {
      if self.failing.contains(id) {
        return Err(io::Error::other("remote unavailable"));
      }
      return Ok(self.partners.iter().filter(|p| &p.id == id).cloned().collect());
    }
    Ok(
      self
        .partners
        .iter()
        .skip(query.offset)
        .take(query.limit)
        .cloned()
        .collect(),
    )
  }

  async fn find_one(
    &self,
    id: &str,
    expand: PartnerExpand,
  ) -> Result<Option<BusinessPartner>, io::Error> {
    let query = PartnerQuery::by_id(id, expand);
    Ok(self.find(&query).await?.into_iter().next())
  }
}

fn ada() -> BusinessPartner {
  BusinessPartner {
    id:         "C1".into(),
    first_name: Some("Ada".into()),
    last_name:  Some("Lovelace".into()),
    name:       Some("Ada Lovelace".into()),
    addresses:  vec![Address {
      email:        vec![EmailAddress { email: "ada@x.com".into() }],
      phone_number: vec![],
    }],
  }
}

fn partner(id: &str, email: &str, phone: &str) -> BusinessPartner {
  BusinessPartner {
    id:         id.into(),
    first_name: Some(format!("First {id}")),
    last_name:  Some(format!("Last {id}")),
    name:       Some(format!("Partner {id}")),
    addresses:  vec![Address {
      email:        vec![EmailAddress { email: email.into() }],
      phone_number: vec![PhoneNumber { phone: phone.into() }],
    }],
  }
}

async fn service(
  gateway: FakeGateway,
) -> (ProcessorService<SqliteStore>, Arc<SqliteStore>, Arc<FakeGateway>) {
  let store = Arc::new(SqliteStore::open_in_memory().await.expect("in-memory store"));
  let gateway = Arc::new(gateway);
  let svc = ProcessorService::standard(store.clone(), gateway.clone());
  (svc, store, gateway)
}

fn for_customer(title: &str, customer_id: &str) -> NewIncident {
  let mut input = NewIncident::new(title);
  input.customer_id = Some(customer_id.into());
  input
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_escalates_urgent_title() {
  let (svc, store, _) = service(FakeGateway::default()).await;

  let created = svc
    .create_incidents(vec![NewIncident::new("Printer is on fire, URGENT!!")])
    .await
    .unwrap();
  assert_eq!(created[0].urgency, Some(Urgency::High));

  let stored = store.get_incident(created[0].id).await.unwrap().unwrap();
  assert_eq!(stored.urgency, Some(Urgency::High));
}

#[tokio::test]
async fn create_without_urgent_title_keeps_urgency() {
  let (svc, _, _) = service(FakeGateway::default()).await;

  let mut input = NewIncident::new("Monitor flickers");
  input.urgency = Some(Urgency::Low);
  let created = svc.create_incidents(vec![input]).await.unwrap();
  assert_eq!(created[0].urgency, Some(Urgency::Low));
}

#[tokio::test]
async fn create_caches_customer_from_partner() {
  let (svc, store, gateway) = service(FakeGateway::with(vec![ada()])).await;

  svc
    .create_incidents(vec![for_customer("Lost password", "C1")])
    .await
    .unwrap();

  let cached = store.get_customer("C1").await.unwrap().unwrap();
  assert_eq!(cached, Customer {
    id:         "C1".into(),
    first_name: Some("Ada".into()),
    last_name:  Some("Lovelace".into()),
    name:       None,
    email:      Some("ada@x.com".into()),
    phone:      None,
  });

  let queries = gateway.queries();
  assert_eq!(queries.len(), 1);
  assert_eq!(queries[0].id.as_deref(), Some("C1"));
  assert_eq!(queries[0].expand, PartnerExpand::AddressAll);
}

#[tokio::test]
async fn create_without_customer_makes_no_remote_call() {
  let (svc, _, gateway) = service(FakeGateway::with(vec![ada()])).await;

  svc
    .create_incidents(vec![NewIncident::new("Anonymous report")])
    .await
    .unwrap();
  assert!(gateway.queries().is_empty());
}

#[tokio::test]
async fn unknown_partner_writes_no_customer() {
  let (svc, store, _) = service(FakeGateway::with(vec![ada()])).await;

  let created = svc
    .create_incidents(vec![for_customer("Who am I", "NOPE")])
    .await
    .unwrap();
  assert_eq!(created.len(), 1);
  assert!(store.get_customer("NOPE").await.unwrap().is_none());
}

#[tokio::test]
async fn refresh_failure_does_not_stop_batch_or_fail_write() {
  let mut gateway = FakeGateway::with(vec![
    partner("C1", "c1@x.com", "1"),
    partner("C2", "c2@x.com", "2"),
    partner("C3", "c3@x.com", "3"),
  ]);
  gateway.failing.insert("C2".into());
  let (svc, store, _) = service(gateway).await;

  let created = svc
    .create_incidents(vec![
      for_customer("one", "C1"),
      for_customer("two", "C2"),
      for_customer("three", "C3"),
    ])
    .await
    .unwrap();
  assert_eq!(created.len(), 3);
  assert_eq!(store.list_incidents().await.unwrap().len(), 3);

  assert!(store.get_customer("C1").await.unwrap().is_some());
  assert!(store.get_customer("C2").await.unwrap().is_none());
  assert!(store.get_customer("C3").await.unwrap().is_some());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_of_closed_incident_is_rejected() {
  let (svc, store, gateway) = service(FakeGateway::with(vec![ada()])).await;

  let mut closed = NewIncident::new("Old issue");
  closed.status = Some(Status::Closed);
  let closed = closed.into_incident();
  store.insert_incidents(vec![closed.clone()]).await.unwrap();

  let patch = IncidentPatch {
    title: Some("Reopened?".into()),
    customer_id: Some("C1".into()),
    ..IncidentPatch::default()
  };
  let err = svc.update_incident(closed.id, patch).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "got {err:?}");

  let stored = store.get_incident(closed.id).await.unwrap().unwrap();
  assert_eq!(stored, closed);
  assert!(gateway.queries().is_empty());
}

#[tokio::test]
async fn update_of_open_incident_proceeds_and_refreshes() {
  let (svc, store, _) = service(FakeGateway::with(vec![ada()])).await;

  let created = svc
    .create_incidents(vec![NewIncident::new("Slow laptop")])
    .await
    .unwrap();

  let patch = IncidentPatch {
    status: Some(Status::InProcess),
    customer_id: Some("C1".into()),
    ..IncidentPatch::default()
  };
  let updated = svc.update_incident(created[0].id, patch).await.unwrap();
  assert_eq!(updated.status, Some(Status::InProcess));
  assert_eq!(updated.customer_id.as_deref(), Some("C1"));
  assert!(store.get_customer("C1").await.unwrap().is_some());
}

#[tokio::test]
async fn closing_an_incident_is_allowed_once() {
  let (svc, _, _) = service(FakeGateway::default()).await;
  let created = svc
    .create_incidents(vec![NewIncident::new("Done soon")])
    .await
    .unwrap();
  let id = created[0].id;

  let close = IncidentPatch {
    status: Some(Status::Closed),
    ..IncidentPatch::default()
  };
  svc.update_incident(id, close.clone()).await.unwrap();
  assert!(matches!(
    svc.update_incident(id, close).await,
    Err(Error::Conflict(_))
  ));
}

#[tokio::test]
async fn update_of_missing_incident_is_not_found() {
  let (svc, _, _) = service(FakeGateway::default()).await;
  let id = Uuid::new_v4();
  let err = svc
    .update_incident(id, IncidentPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::IncidentNotFound(missing) if missing == id));
}

#[tokio::test]
async fn repeated_refresh_yields_same_customer() {
  let (svc, store, _) = service(FakeGateway::with(vec![ada()])).await;

  let created = svc
    .create_incidents(vec![for_customer("first", "C1")])
    .await
    .unwrap();
  let first = store.get_customer("C1").await.unwrap();

  svc
    .update_incident(created[0].id, IncidentPatch::default())
    .await
    .unwrap();
  let second = store.get_customer("C1").await.unwrap();

  assert_eq!(first, second);
}

#[tokio::test]
async fn refresh_replaces_stale_cached_row() {
  let (svc, store, _) = service(FakeGateway::with(vec![ada()])).await;

  let mut stale = Customer::new("C1");
  stale.email = Some("old@x.com".into());
  stale.phone = Some("000".into());
  store.upsert_customer(stale).await.unwrap();

  svc
    .create_incidents(vec![for_customer("new ticket", "C1")])
    .await
    .unwrap();

  let cached = store.get_customer("C1").await.unwrap().unwrap();
  assert_eq!(cached.email.as_deref(), Some("ada@x.com"));
  assert_eq!(cached.phone, None);
}

// ─── Customer reads ──────────────────────────────────────────────────────────

#[tokio::test]
async fn customer_read_pages_through_gateway() {
  let partners = (0..150)
    .map(|n| partner(&format!("P{n:03}"), &format!("p{n}@x.com"), "0"))
    .collect();
  let (svc, store, gateway) = service(FakeGateway::with(partners)).await;

  let page = svc
    .read_customers(Pagination {
      limit:  Some(10),
      offset: 100,
    })
    .await
    .unwrap();

  let queries = gateway.queries();
  assert_eq!(queries.len(), 1);
  assert_eq!(queries[0].limit, 100);
  assert_eq!(queries[0].offset, 100);
  assert_eq!(queries[0].id, None);
  assert_eq!(queries[0].expand, PartnerExpand::AddressEmail);

  assert_eq!(page.rows.len(), 50);
  assert_eq!(page.total, 50);
  assert_eq!(page.rows[0].id, "P100");
  assert_eq!(page.rows[0].name.as_deref(), Some("Partner P100"));
  assert_eq!(page.rows[0].email.as_deref(), Some("p100@x.com"));
  assert_eq!(page.rows[0].phone, None);

  // Reads never populate the local cache.
  assert!(store.list_customers(Pagination::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn customer_read_without_handler_falls_back_to_store() {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  store.upsert_customer(Customer::new("C1")).await.unwrap();
  store.upsert_customer(Customer::new("C2")).await.unwrap();

  let svc = ProcessorService::new(store, HandlerRegistry::default());
  let page = svc.read_customers(Pagination::default()).await.unwrap();
  assert_eq!(page.total, 2);
  assert_eq!(page.rows[1].id, "C2");
}
