//! GraphqlCollaborator - the managed data API over GraphQL/HTTPS.
//!
//! Request building and response decoding are split so the decoding half
//! can be tested without a network.

use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use servicedeck_core::{
    application::{ApplicationError, CollaboratorOperation, ListResponse, ServiceCollaborator},
    domain::{NewService, ServiceId, ServiceRecord},
    error::{DeckError, DeckResult},
};

use crate::backend_outputs::BackendOutputs;

const USER_AGENT: &str = concat!("servicedeck/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-api-key";

const SERVICE_FIELDS: &str = "id title description createdAt updatedAt";

fn list_query() -> String {
    format!(
        "query ListServices($nextToken: String) {{ \
         listServices(nextToken: $nextToken) {{ items {{ {SERVICE_FIELDS} }} nextToken }} }}"
    )
}

fn create_mutation() -> String {
    format!(
        "mutation CreateService($input: CreateServiceInput!) {{ \
         createService(input: $input) {{ {SERVICE_FIELDS} }} }}"
    )
}

const DELETE_MUTATION: &str = "mutation DeleteService($input: DeleteServiceInput!) { \
     deleteService(input: $input) { id } }";

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListData {
    list_services: Option<ListPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage {
    #[serde(default)]
    items: Vec<Option<ServiceRecord>>,
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    create_service: Option<ServiceRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteData {
    delete_service: Option<Value>,
}

/// One decoded page of a listing.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct DecodedPage {
    pub items: Vec<ServiceRecord>,
    pub errors: Vec<String>,
    pub next_token: Option<String>,
}

fn decode<T: DeserializeOwned>(
    operation: CollaboratorOperation,
    body: &str,
) -> DeckResult<Envelope<T>> {
    serde_json::from_str(body).map_err(|e| {
        ApplicationError::rejected(operation, format!("malformed response: {e}")).into()
    })
}

fn joined(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Token for the next page. Rejects a token equal to the one just sent.
pub(crate) fn following_token(
    sent: Option<&str>,
    received: Option<String>,
) -> DeckResult<Option<String>> {
    match received {
        Some(token) if sent == Some(token.as_str()) => Err(ApplicationError::rejected(
            CollaboratorOperation::List,
            format!("backend repeated nextToken '{token}'"),
        )
        .into()),
        other => Ok(other),
    }
}

/// Decode a list page. Errors travel with whatever items came back.
pub(crate) fn decode_list_page(body: &str) -> DeckResult<DecodedPage> {
    let envelope: Envelope<ListData> = decode(CollaboratorOperation::List, body)?;
    let errors: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();

    let Some(page) = envelope.data.and_then(|d| d.list_services) else {
        if errors.is_empty() {
            return Err(ApplicationError::rejected(
                CollaboratorOperation::List,
                "response carried neither data nor errors",
            )
            .into());
        }
        return Ok(DecodedPage {
            errors,
            ..DecodedPage::default()
        });
    };

    Ok(DecodedPage {
        // Null entries are items the resolver failed on; their errors are
        // already in `errors`.
        items: page.items.into_iter().flatten().collect(),
        errors,
        next_token: page.next_token,
    })
}

pub(crate) fn decode_create(body: &str) -> DeckResult<ServiceRecord> {
    let envelope: Envelope<CreateData> = decode(CollaboratorOperation::Create, body)?;

    match envelope.data.and_then(|d| d.create_service) {
        Some(record) => Ok(record),
        None if !envelope.errors.is_empty() => Err(ApplicationError::rejected(
            CollaboratorOperation::Create,
            joined(&envelope.errors),
        )
        .into()),
        None => Err(ApplicationError::rejected(
            CollaboratorOperation::Create,
            "backend returned no record",
        )
        .into()),
    }
}

pub(crate) fn decode_delete(body: &str, id: &ServiceId) -> DeckResult<()> {
    let envelope: Envelope<DeleteData> = decode(CollaboratorOperation::Delete, body)?;

    if !envelope.errors.is_empty() {
        return Err(ApplicationError::rejected(
            CollaboratorOperation::Delete,
            joined(&envelope.errors),
        )
        .into());
    }

    match envelope.data.and_then(|d| d.delete_service) {
        Some(Value::Null) | None => Err(ApplicationError::ServiceNotFound { id: id.to_string() }.into()),
        Some(_) => Ok(()),
    }
}

/// Production collaborator talking to the endpoint in the backend outputs.
pub struct GraphqlCollaborator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GraphqlCollaborator {
    /// Build a client for the endpoint named in `outputs`.
    ///
    /// No request timeout is configured; the backend client owns that policy.
    pub fn new(outputs: &BackendOutputs) -> DeckResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DeckError::Configuration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: outputs.data.url.clone(),
            api_key: outputs.data.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one GraphQL document and return the raw body.
    async fn post(
        &self,
        operation: CollaboratorOperation,
        query: &str,
        variables: Value,
    ) -> DeckResult<String> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApplicationError::transport(operation, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApplicationError::transport(operation, e.to_string()))?;

        if !status.is_success() {
            return Err(ApplicationError::rejected(
                operation,
                format!("HTTP {}: {}", status, body.trim()),
            )
            .into());
        }

        Ok(body)
    }
}

#[async_trait]
impl ServiceCollaborator for GraphqlCollaborator {
    /// Follows `nextToken` until the listing is exhausted.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn list(&self) -> DeckResult<ListResponse> {
        let query = list_query();
        let mut response = ListResponse::default();
        let mut next_token: Option<String> = None;

        loop {
            let body = self
                .post(
                    CollaboratorOperation::List,
                    &query,
                    json!({ "nextToken": next_token }),
                )
                .await?;
            let page = decode_list_page(&body)?;

            response.items.extend(page.items);
            response.errors.extend(page.errors);

            match following_token(next_token.as_deref(), page.next_token)? {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        if response.is_partial() {
            warn!(errors = response.errors.len(), "Listing returned errors");
        }
        debug!(count = response.items.len(), "Listed services");
        Ok(response)
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create(&self, draft: NewService) -> DeckResult<ServiceRecord> {
        let body = self
            .post(
                CollaboratorOperation::Create,
                &create_mutation(),
                json!({ "input": { "title": draft.title, "description": draft.description } }),
            )
            .await?;
        decode_create(&body)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ServiceId) -> DeckResult<()> {
        let body = self
            .post(
                CollaboratorOperation::Delete,
                DELETE_MUTATION,
                json!({ "input": { "id": id.as_str() } }),
            )
            .await?;
        decode_delete(&body, id)
    }
}
