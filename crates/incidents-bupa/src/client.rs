//! Async HTTP client for the `A_BusinessPartner` entity set.

use std::time::Duration;

use incidents_core::{
  gateway::{PartnerExpand, PartnerGateway, PartnerQuery},
  partner::BusinessPartner,
};
use reqwest::Client;
use url::Url;

use crate::{
  config::{AuthMode, DestinationConfig},
  error::GatewayError,
  wire::decode_partners,
};

const ENTITY_SET: &str = "A_BusinessPartner";

/// [`PartnerGateway`] backed by an OData V2 business partner service.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpPartnerGateway {
  client:     Client,
  config:     DestinationConfig,
  entity_url: Url,
}

impl HttpPartnerGateway {
  pub fn new(config: DestinationConfig) -> Result<Self, GatewayError> {
    let entity_url = entity_url(&config)?;
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;

    tracing::info!(
      destination = %config.name,
      url = %entity_url,
      "configured business partner destination"
    );
    Ok(Self {
      client,
      config,
      entity_url,
    })
  }

  pub fn entity_url(&self) -> &Url { &self.entity_url }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.config.auth {
      AuthMode::None => req,
      AuthMode::Basic { username, password } => {
        req.basic_auth(username, Some(password))
      }
      AuthMode::ApiKey { key } => req.header("APIKey", key),
    }
  }
}

/// `<base_url>/<service_path>/A_BusinessPartner`
fn entity_url(config: &DestinationConfig) -> Result<Url, GatewayError> {
  let raw = format!(
    "{}/{}/{ENTITY_SET}",
    config.base_url.trim_end_matches('/'),
    config.service_path.trim_matches('/'),
  );
  Url::parse(&raw).map_err(|e| GatewayError::InvalidConfig(format!("{raw}: {e}")))
}

/// OData system query options for `query`.
fn query_params(query: &PartnerQuery) -> Vec<(&'static str, String)> {
  let expand = match query.expand {
    PartnerExpand::AddressEmail => "to_BusinessPartnerAddress/to_EmailAddress",
    PartnerExpand::AddressAll => {
      "to_BusinessPartnerAddress/to_EmailAddress,to_BusinessPartnerAddress/to_PhoneNumber"
    }
  };

  let mut params = vec![
    ("$format", "json".to_string()),
    ("$expand", expand.to_string()),
    ("$top", query.limit.to_string()),
    ("$skip", query.offset.to_string()),
  ];
  if let Some(id) = &query.id {
    params.push((
      "$filter",
      format!("BusinessPartner eq '{}'", id.replace('\'', "''")),
    ));
  }
  params
}

impl PartnerGateway for HttpPartnerGateway {
  type Error = GatewayError;

  async fn find(&self, query: &PartnerQuery) -> Result<Vec<BusinessPartner>, GatewayError> {
    tracing::debug!(
      id = ?query.id,
      limit = query.limit,
      offset = query.offset,
      "querying business partners"
    );

    let resp = self
      .auth(self.client.get(self.entity_url.clone()))
      .header(reqwest::header::ACCEPT, "application/json")
      .query(&query_params(query))
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(GatewayError::Status {
        status: status.as_u16(),
        url:    resp.url().to_string(),
      });
    }

    let body = resp.bytes().await?;
    Ok(decode_partners(&body)?)
  }

  async fn find_one(
    &self,
    id: &str,
    expand: PartnerExpand,
  ) -> Result<Option<BusinessPartner>, GatewayError> {
    let query = PartnerQuery::by_id(id, expand);
    Ok(self.find(&query).await?.into_iter().next())
  }
}
