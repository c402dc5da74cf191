//! Documentation Fragment Store (Use Case)
//!
//! Registers and enumerates documentation fragments for one API.
//! Nothing is cached locally; every call reflects the platform.

use std::sync::Arc;

use crate::domain::{
    DocumentationFragment, DocumentationPart, DomainError, FragmentHandle, LocationKey,
    LocationSpec, Properties, RegistrationMode,
};
use crate::ports::DocumentationPlatform;

/// Application service for documentation fragments
pub struct FragmentStore<P: DocumentationPlatform + ?Sized> {
    platform: Arc<P>,
    api_id: String,
    mode: RegistrationMode,
}

impl<P: DocumentationPlatform + ?Sized> FragmentStore<P> {
    /// Store in append mode
    pub fn new(platform: Arc<P>, api_id: impl Into<String>) -> Self {
        Self {
            platform,
            api_id: api_id.into(),
            mode: RegistrationMode::Append,
        }
    }

    pub fn with_mode(mut self, mode: RegistrationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn api_id(&self) -> &str {
        &self.api_id
    }

    pub fn mode(&self) -> RegistrationMode {
        self.mode
    }

    /// Register a fragment at `location`
    ///
    /// The location is validated before anything reaches the platform.
    /// In append mode a second registration of the same key creates a
    /// second part; in upsert mode the existing part is updated.
    pub async fn register(
        &self,
        location: impl Into<LocationSpec>,
        properties: Properties,
    ) -> Result<FragmentHandle, DomainError> {
        let location = location.into().validate()?;

        let handle = match self.mode {
            RegistrationMode::Append => {
                self.platform
                    .create_documentation_part(&self.api_id, &location, &properties)
                    .await?
            }
            RegistrationMode::Upsert => self.upsert(&location, &properties).await?,
        };

        tracing::info!(
            "Registered documentation for {} ({}, part {})",
            location,
            self.mode,
            handle
        );

        Ok(handle)
    }

    /// Register an already-built fragment
    pub async fn register_fragment(
        &self,
        fragment: DocumentationFragment,
    ) -> Result<FragmentHandle, DomainError> {
        self.register(fragment.location, fragment.properties).await
    }

    async fn upsert(
        &self,
        location: &LocationKey,
        properties: &Properties,
    ) -> Result<FragmentHandle, DomainError> {
        let parts = self.list_parts().await?;
        let mut matching = parts.iter().filter(|part| &part.location == location);

        match matching.next() {
            Some(existing) => {
                let duplicates = matching.count();
                if duplicates > 0 {
                    tracing::warn!(
                        "{} has {} duplicate documentation parts; updating {}",
                        location,
                        duplicates,
                        existing.id
                    );
                }
                self.platform
                    .update_documentation_part(&self.api_id, &existing.id, properties)
                    .await
            }
            None => {
                self.platform
                    .create_documentation_part(&self.api_id, location, properties)
                    .await
            }
        }
    }

    /// Current fragments as (key, fragment) pairs
    pub async fn list(&self) -> Result<Vec<(LocationKey, DocumentationFragment)>, DomainError> {
        let parts = self.list_parts().await?;
        Ok(parts
            .into_iter()
            .map(|part| {
                let fragment = part.into_fragment();
                (fragment.location.clone(), fragment)
            })
            .collect())
    }

    /// Current parts including their platform ids
    pub async fn list_parts(&self) -> Result<Vec<DocumentationPart>, DomainError> {
        let parts = self
            .platform
            .list_documentation_parts(&self.api_id)
            .await?;
        tracing::debug!("Listed {} documentation parts for {}", parts.len(), self.api_id);
        Ok(parts)
    }
}
