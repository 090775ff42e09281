use crate::domain::model::{
    Contact, ContactCounts, ContactPage, ContactQuery, ContactStatus, InventoryItem,
    InventorySnapshot, InventoryStats, Operation, ResourceKind,
};
use crate::domain::ports::EntityGateway;
use crate::domain::session::Credential;
use crate::utils::error::{ConsoleError, Result};
use crate::utils::validation;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct ContactListEnvelope {
    success: bool,
    #[serde(default)]
    data: Vec<Contact>,
    counts: Option<ContactCounts>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryEnvelope {
    success: bool,
    stats: Option<InventoryStats>,
    #[serde(default)]
    low_stock_items: Vec<InventoryItem>,
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: ContactStatus,
}

/// 透過 REST API 存取後台服務
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: Url,
    client: Client,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        validation::validate_url("server.base_url", base_url)?;
        let base_url = Url::parse(base_url).map_err(|e| ConsoleError::config(e.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConsoleError::config(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConsoleError::config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        credential: &Credential,
        resource: ResourceKind,
        operation: Operation,
    ) -> Result<reqwest::Response> {
        let response = request
            .bearer_auth(credential.token())
            .send()
            .await
            .map_err(|e| ConsoleError::request_failed(resource, operation, e))?;

        tracing::debug!("{} {} -> {}", operation, resource, response.status());

        if !response.status().is_success() {
            return Err(ConsoleError::request_failed(
                resource,
                operation,
                format!("HTTP {}", response.status()),
            ));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: ResourceKind,
        operation: Operation,
    ) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ConsoleError::request_failed(resource, operation, e))
    }
}

#[async_trait]
impl EntityGateway for HttpGateway {
    async fn list_contacts(
        &self,
        query: &ContactQuery,
        credential: &Credential,
    ) -> Result<ContactPage> {
        let (resource, operation) = (ResourceKind::Contacts, Operation::List);
        let url = self.endpoint(&["api", "contact", "admin", "all"])?;
        let request = self.client.get(url).query(&[
            ("search", query.search.as_str()),
            ("status", query.status.as_str()),
        ]);

        let response = self.send(request, credential, resource, operation).await?;
        let envelope: ContactListEnvelope = Self::decode(response, resource, operation).await?;

        if !envelope.success {
            return Err(ConsoleError::request_failed(
                resource,
                operation,
                "server reported success=false",
            ));
        }

        Ok(ContactPage {
            contacts: envelope.data,
            counts: envelope.counts,
        })
    }

    async fn update_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
        credential: &Credential,
    ) -> Result<()> {
        let url = self.endpoint(&["api", "contact", "admin", id, "status"])?;
        let request = self.client.put(url).json(&StatusBody { status });

        self.send(request, credential, ResourceKind::Contacts, Operation::UpdateStatus)
            .await?;
        Ok(())
    }

    async fn delete_contact(&self, id: &str, credential: &Credential) -> Result<()> {
        let url = self.endpoint(&["api", "contact", "admin", id])?;

        self.send(
            self.client.delete(url),
            credential,
            ResourceKind::Contacts,
            Operation::Delete,
        )
        .await?;
        Ok(())
    }

    async fn inventory_snapshot(&self, credential: &Credential) -> Result<InventorySnapshot> {
        let (resource, operation) = (ResourceKind::Inventory, Operation::List);
        let url = self.endpoint(&["api", "product", "inventory"])?;

        let response = self
            .send(self.client.get(url), credential, resource, operation)
            .await?;
        let envelope: InventoryEnvelope = Self::decode(response, resource, operation).await?;

        if !envelope.success {
            return Err(ConsoleError::request_failed(
                resource,
                operation,
                "server reported success=false",
            ));
        }

        Ok(InventorySnapshot {
            stats: envelope.stats,
            low_stock_items: envelope.low_stock_items,
        })
    }
}
