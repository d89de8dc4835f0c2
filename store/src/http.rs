//! `reqwest` implementation of [`FloorPlanStore`].
//!
//! Thin HTTP wrapper: build the request, read status and body text, hand
//! both to the pure envelope parsers in [`crate::api`].

use std::time::Duration;

use async_trait::async_trait;
use floor_canvas::doc::{Collection, Entity, EntityKind, Measurement, Path};
use floor_canvas::engine::{NewMeasurement, NewPath, PositionPatch};
use tracing::debug;

use crate::api::{self, FloorPlanStore};
use crate::config::StoreConfig;
use crate::error::StoreError;

pub struct HttpStore {
    http: reqwest::Client,
    config: StoreConfig,
}

impl HttpStore {
    /// # Errors
    ///
    /// `HttpClientBuild` if the TLS backend cannot be initialized.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| StoreError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send and return `(status, body text)`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), StoreError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        Ok((status, text))
    }
}

#[async_trait]
impl FloorPlanStore for HttpStore {
    async fn list(&self, floor_plan_id: &str, kind: EntityKind, is_active: bool) -> Result<Collection, StoreError> {
        let url = api::collection_url(&self.config.base_url, kind);
        debug!(%url, %floor_plan_id, "listing collection");
        let request = self
            .http
            .get(url)
            .query(&[("floorPlanId", floor_plan_id), ("isActive", if is_active { "true" } else { "false" })]);
        let (status, text) = self.send(request).await?;
        api::parse_collection(kind, status, &text)
    }

    async fn update(&self, kind: EntityKind, id: &str, patch: &PositionPatch) -> Result<Entity, StoreError> {
        let url = api::entity_url(&self.config.base_url, kind, id);
        debug!(%url, "updating entity position");
        let (status, text) = self.send(self.http.put(url).json(patch)).await?;
        api::parse_entity(kind, status, &text)
    }

    async fn create_path(&self, path: &NewPath) -> Result<Path, StoreError> {
        let url = api::collection_url(&self.config.base_url, EntityKind::Path);
        let (status, text) = self.send(self.http.post(url).json(path)).await?;
        api::parse_data(status, &text)
    }

    async fn create_measurement(&self, measurement: &NewMeasurement) -> Result<Measurement, StoreError> {
        let url = api::collection_url(&self.config.base_url, EntityKind::Measurement);
        let (status, text) = self.send(self.http.post(url).json(measurement)).await?;
        api::parse_data(status, &text)
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
