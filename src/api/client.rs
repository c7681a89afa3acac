use std::collections::BTreeMap;
use std::time::Duration;

use color_eyre::{eyre::eyre, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::error::ApiError;
use super::types::{Invoice, InvoiceLine, InvoiceLineMutation, InvoiceMutation};
use crate::config::ApiConfig;

/// Error body in ASP.NET problem-details shape
#[derive(Debug, Default, Deserialize)]
struct ProblemDetails {
  #[serde(default)]
  title: Option<String>,
  #[serde(default)]
  detail: Option<String>,
  #[serde(default)]
  errors: BTreeMap<String, Vec<String>>,
}

/// Invoicing API client
///
/// One method per endpoint. Failures are returned as-is; retrying is up to
/// the caller.
#[derive(Clone)]
pub struct InvoiceClient {
  http: reqwest::Client,
  base_url: Url,
}

impl InvoiceClient {
  pub fn new(config: &ApiConfig) -> Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .danger_accept_invalid_certs(config.accept_invalid_certs)
      .user_agent(concat!("invoicer/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

    Self::from_reqwest(&config.url, http)
  }

  /// Wrap an existing `reqwest::Client`
  pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self> {
    let mut base_url =
      Url::parse(base_url).map_err(|e| eyre!("Invalid API url {}: {}", base_url, e))?;

    // Url::join replaces the last segment unless the path ends with a slash
    if !base_url.path().ends_with('/') {
      let path = format!("{}/", base_url.path());
      base_url.set_path(&path);
    }

    Ok(Self { http, base_url })
  }

  /// Host (and port) of the API, for the header bar
  pub fn host(&self) -> String {
    match (self.base_url.host_str(), self.base_url.port()) {
      (Some(host), Some(port)) => format!("{}:{}", host, port),
      (Some(host), None) => host.to_string(),
      _ => self.base_url.to_string(),
    }
  }

  // Invoices

  pub async fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
    self.get("Invoice/List").await
  }

  pub async fn get_invoice(&self, id: i64) -> Result<Invoice, ApiError> {
    self.get(&format!("Invoice/{}", id)).await
  }

  /// Create an invoice header, returning the server-assigned id
  pub async fn create_invoice(&self, body: &InvoiceMutation) -> Result<i64, ApiError> {
    self.post("Invoice", body).await
  }

  pub async fn update_invoice(&self, id: i64, body: &InvoiceMutation) -> Result<(), ApiError> {
    self.put(&format!("Invoice/{}", id), body).await
  }

  /// Delete an invoice; the server removes its lines too
  pub async fn delete_invoice(&self, id: i64) -> Result<(), ApiError> {
    self.delete(&format!("Invoice/{}", id)).await
  }

  // Invoice lines

  pub async fn get_line(&self, invoice_id: i64, line_number: i64) -> Result<InvoiceLine, ApiError> {
    self
      .get(&format!("InvoiceLine/{}/{}", invoice_id, line_number))
      .await
  }

  /// Create a line under an invoice, returning the server-assigned line number
  pub async fn create_line(
    &self,
    invoice_id: i64,
    body: &InvoiceLineMutation,
  ) -> Result<i64, ApiError> {
    self.post(&format!("InvoiceLine/{}", invoice_id), body).await
  }

  pub async fn update_line(
    &self,
    invoice_id: i64,
    line_number: i64,
    body: &InvoiceLineMutation,
  ) -> Result<(), ApiError> {
    self
      .put(&format!("InvoiceLine/{}/{}", invoice_id, line_number), body)
      .await
  }

  pub async fn delete_line(&self, invoice_id: i64, line_number: i64) -> Result<(), ApiError> {
    self
      .delete(&format!("InvoiceLine/{}/{}", invoice_id, line_number))
      .await
  }

  // HTTP verbs

  fn url(&self, path: &str) -> Result<Url, ApiError> {
    self
      .base_url
      .join(path)
      .map_err(|e| ApiError::Network(format!("invalid request path {}: {}", path, e)))
  }

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
    let url = self.url(path)?;
    debug!("GET {url}");

    let resp = self.http.get(url).send().await?;
    handle_response(resp).await
  }

  async fn post<T: DeserializeOwned, B: Serialize + Sync>(
    &self,
    path: &str,
    body: &B,
  ) -> Result<T, ApiError> {
    let url = self.url(path)?;
    debug!("POST {url}");

    let resp = self.http.post(url).json(body).send().await?;
    handle_response(resp).await
  }

  async fn put<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ApiError> {
    let url = self.url(path)?;
    debug!("PUT {url}");

    let resp = self.http.put(url).json(body).send().await?;
    handle_empty(resp).await
  }

  async fn delete(&self, path: &str) -> Result<(), ApiError> {
    let url = self.url(path)?;
    debug!("DELETE {url}");

    let resp = self.http.delete(url).send().await?;
    handle_empty(resp).await
  }
}

// Response handling

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
  let status = resp.status();
  if !status.is_success() {
    return Err(parse_error(status, resp).await);
  }

  let body = resp.text().await?;
  serde_json::from_str(&body).map_err(|e| {
    let preview = body.chars().take(200).collect::<String>();
    ApiError::Decode(format!("{} (body: {:?})", e, preview))
  })
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), ApiError> {
  let status = resp.status();
  if status.is_success() {
    Ok(())
  } else {
    Err(parse_error(status, resp).await)
  }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> ApiError {
  let raw = resp.text().await.unwrap_or_default();
  let problem = serde_json::from_str::<ProblemDetails>(&raw).ok();

  let reason = status
    .canonical_reason()
    .map(String::from)
    .unwrap_or_else(|| status.to_string());

  let (message, fields) = match problem {
    Some(p) => {
      let message = p.detail.or(p.title).unwrap_or(reason);
      (message, p.errors)
    }
    None if raw.trim().is_empty() => (reason, BTreeMap::new()),
    None => (raw, BTreeMap::new()),
  };

  if status.is_server_error() {
    return ApiError::Server {
      status: status.as_u16(),
      message,
    };
  }

  let message = if fields.is_empty() {
    message
  } else {
    let details: Vec<String> = fields
      .iter()
      .flat_map(|(field, msgs)| msgs.iter().map(move |m| format!("{}: {}", field, m)))
      .collect();
    format!("{} ({})", message, details.join("; "))
  };

  ApiError::Validation {
    status: status.as_u16(),
    message,
    fields,
  }
}
