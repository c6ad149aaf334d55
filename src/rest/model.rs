//! Lazily-inflated resource instances.
//!
//! A [`Model`] is one Atlas resource: a JSON payload plus everything needed
//! to address it. Reading a field that is not loaded fetches the resource
//! once; afterwards a missing field is an error rather than another request.
//!
//! # Lifecycle
//!
//! ```text
//! Empty --get/inflate--> Inflating --ok--> Inflated
//!                            |
//!                            +--error--> previous state
//! Inflated --delete--> Invalidated --get--> Inflating ...
//! ```
//!
//! Relationship fields are exposed as [`ModelCollection`]s through
//! [`Model::relationship`]. Dependent relationships are built from the
//! payload as soon as it is loaded; independent ones are fetched from
//! beneath the model's URL on first access and cached.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut entity = atlas.entity_guid("8bbea92b-d98c-4613-ae6e-1a9d0b4f344b")?;
//!
//! // First access fetches the entity, the second is served locally.
//! let status = entity.get("entity").await?["status"].clone();
//! let referred = entity.get("referredEntities").await?;
//!
//! entity.set("entity", new_entity);
//! entity.update(Map::new()).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{ResponseBody, Transport};
use crate::rest::codec;
use crate::rest::collection::ModelCollection;
use crate::rest::errors::ResourceError;
use crate::rest::kind::{Dependence, MutationTarget, ResourceKind};
use crate::rest::path::{resource_url, ResourceOperation};

/// How a model is addressed on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Addressed by primary key beneath the owner URL.
    Key(String),
    /// Addressed by a fixed absolute URL.
    Url(String),
    /// Not addressable; only its payload exists.
    Detached,
}

/// Where a model is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InflationState {
    /// Nothing fetched yet.
    Empty,
    /// A fetch is in flight, or was cancelled before completing.
    Inflating,
    /// The payload reflects a fetched or materialized resource.
    Inflated,
    /// The resource was deleted; the next read fetches again.
    Invalidated,
}

/// A single resource instance.
#[derive(Debug, Clone)]
pub struct Model {
    kind: &'static ResourceKind,
    transport: Arc<dyn Transport>,
    owner_url: String,
    collection_url: String,
    identity: Identity,
    url: Option<String>,
    query: Vec<(String, String)>,
    payload: Map<String, Value>,
    state: InflationState,
    relations: HashMap<&'static str, ModelCollection>,
}

// Verify Model can move between tasks
const _: fn() = || {
    const fn assert_send<T: Send>() {}
    assert_send::<Model>();
};

impl Model {
    /// Creates an unloaded model.
    ///
    /// `owner_url` is the URL the kind's path is joined onto. A
    /// [`Identity::Key`] model lives at `{owner_url}/{path}/{key}`.
    #[must_use]
    pub fn new(
        kind: &'static ResourceKind,
        transport: Arc<dyn Transport>,
        owner_url: impl Into<String>,
        identity: Identity,
    ) -> Self {
        let owner_url = owner_url.into();
        let url = match &identity {
            Identity::Key(key) => Some(resource_url(&owner_url, kind.path, Some(key))),
            Identity::Url(url) => Some(url.clone()),
            Identity::Detached => None,
        };
        let collection_url = resource_url(&owner_url, kind.collection_segment(), None);
        Self {
            kind,
            transport,
            owner_url,
            collection_url,
            identity,
            url,
            query: Vec::new(),
            payload: Map::new(),
            state: InflationState::Empty,
            relations: HashMap::new(),
        }
    }

    /// Creates an already-loaded model from a payload.
    ///
    /// The identity is taken from the kind's primary key when the payload
    /// carries it, and from `fallback` otherwise.
    pub(crate) fn materialized(
        kind: &'static ResourceKind,
        transport: Arc<dyn Transport>,
        owner_url: &str,
        payload: Map<String, Value>,
        fallback: Identity,
    ) -> Self {
        let identity = kind
            .primary_key
            .and_then(|pk| payload.get(pk))
            .and_then(Value::as_str)
            .map_or(fallback, |key| Identity::Key(key.to_string()));
        let mut model = Self::new(kind, transport, owner_url, identity);
        model.payload = payload;
        model.state = InflationState::Inflated;
        model.wrap_relations();
        model
    }

    /// Sets query parameters sent with every fetch of this model.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Seeds payload fields without marking the model as loaded.
    #[must_use]
    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload.extend(payload);
        self
    }

    /// Returns the model's kind.
    #[must_use]
    pub const fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    /// Returns how the model is addressed.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the primary key, if the model is addressed by one.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match &self.identity {
            Identity::Key(key) => Some(key),
            Identity::Url(_) | Identity::Detached => None,
        }
    }

    /// Returns the model's absolute URL, if it is addressable.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the query sent with fetches.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the loaded payload as-is.
    #[must_use]
    pub const fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Returns the load state.
    #[must_use]
    pub const fn state(&self) -> InflationState {
        self.state
    }

    /// Returns `true` once the payload reflects a fetched resource.
    #[must_use]
    pub fn is_inflated(&self) -> bool {
        self.state == InflationState::Inflated
    }

    /// Returns a relationship collection if it has already been built.
    #[must_use]
    pub fn relationship_cached(&self, field: &str) -> Option<&ModelCollection> {
        self.relations.get(field)
    }

    /// Returns a field, fetching the model once if the field is missing.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InsufficientIdentity`] if the field is missing and
    ///   the model has no URL (or a previous fetch was cancelled)
    /// - [`ResourceError::FieldNotFound`] if the field is missing after a fetch
    /// - [`ResourceError::Http`] if the fetch fails
    pub async fn get(&mut self, field: &str) -> Result<&Value, ResourceError> {
        if !self.payload.contains_key(field) {
            if self.url.is_none() || self.state == InflationState::Inflating {
                return Err(ResourceError::InsufficientIdentity {
                    resource: self.kind.name,
                });
            }
            if self.state == InflationState::Inflated {
                return Err(self.field_not_found(field));
            }
            self.inflate().await?;
        }
        let resource = self.kind.name;
        self.payload
            .get(field)
            .ok_or_else(|| ResourceError::FieldNotFound {
                resource,
                field: field.to_string(),
            })
    }

    /// Returns a mutable reference to a loaded field. Never fetches.
    ///
    /// A cached relationship built from this field is dropped, so it is
    /// rebuilt from the edited value on next access.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.relations.remove(field);
        self.payload.get_mut(field)
    }

    /// Sets a field locally. Nothing is sent until [`Model::update`].
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        self.relations.remove(field.as_str());
        self.payload.insert(field, value);
    }

    /// Fetches the model and merges the response into the payload.
    ///
    /// Dropping the returned future mid-flight leaves the model in
    /// [`InflationState::Inflating`]; [`Model::reload`] recovers from that.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InsufficientIdentity`] if the model has no URL,
    /// or the transport error. On error the previous state is restored.
    pub async fn inflate(&mut self) -> Result<&mut Self, ResourceError> {
        let url = self
            .url
            .clone()
            .ok_or(ResourceError::InsufficientIdentity {
                resource: self.kind.name,
            })?;
        let previous = self.state;
        self.state = InflationState::Inflating;
        tracing::debug!("Inflating {} from {}", self.kind.name, url);

        let result = codec::send(
            self.transport.as_ref(),
            ResourceOperation::Fetch.default_http_method(),
            &url,
            &self.query,
            None,
        )
        .await
        .and_then(|body| self.load(body).map(|_| ()));

        if let Err(e) = result {
            self.state = previous;
            return Err(e);
        }
        Ok(self)
    }

    /// Discards the payload and fetches the model again.
    ///
    /// # Errors
    ///
    /// See [`Model::inflate`].
    pub async fn reload(&mut self) -> Result<&mut Self, ResourceError> {
        self.payload.clear();
        self.relations.clear();
        self.state = InflationState::Empty;
        self.inflate().await
    }

    /// Merges a response body into the payload and marks the model loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedBody`] unless the body, after
    /// stripping the envelope, is a JSON object.
    pub fn load(&mut self, body: ResponseBody) -> Result<&mut Self, ResourceError> {
        let fields = codec::object_body(self.kind, body)?;
        self.payload.extend(fields);
        self.state = InflationState::Inflated;
        self.wrap_relations();
        Ok(self)
    }

    /// Creates the resource on the server.
    ///
    /// `fields` are merged with the current payload into the request body.
    /// The response is merged back into the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] if the kind cannot be
    /// created, or the transport error.
    pub async fn create(&mut self, fields: Map<String, Value>) -> Result<&mut Self, ResourceError> {
        self.mutate(ResourceOperation::Create, fields).await
    }

    /// Updates the resource on the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] if the kind cannot be
    /// updated, or the transport error.
    pub async fn update(&mut self, fields: Map<String, Value>) -> Result<&mut Self, ResourceError> {
        self.mutate(ResourceOperation::Update, fields).await
    }

    async fn mutate(
        &mut self,
        operation: ResourceOperation,
        fields: Map<String, Value>,
    ) -> Result<&mut Self, ResourceError> {
        if !self.kind.allows(operation) {
            return Err(ResourceError::unsupported(self.kind.name, operation.as_str()));
        }
        let body = codec::input_body(self.kind, &self.current_payload(), fields);
        let url = match (self.kind.mutation_target, &self.url) {
            (MutationTarget::Model, Some(url)) => url.clone(),
            _ => self.collection_url.clone(),
        };
        tracing::debug!("{} {} at {}", operation.as_str(), self.kind.name, url);

        let response = codec::send(
            self.transport.as_ref(),
            operation.default_http_method(),
            &url,
            &[],
            Some(body),
        )
        .await?;
        self.load(response)
    }

    /// Deletes the resource and invalidates the local copy.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] if the kind cannot be
    /// deleted, [`ResourceError::InsufficientIdentity`] if the model has no
    /// URL, or the transport error.
    pub async fn delete(&mut self) -> Result<(), ResourceError> {
        if !self.kind.allows(ResourceOperation::Delete) {
            return Err(ResourceError::unsupported(
                self.kind.name,
                ResourceOperation::Delete.as_str(),
            ));
        }
        let url = self
            .url
            .clone()
            .ok_or(ResourceError::InsufficientIdentity {
                resource: self.kind.name,
            })?;
        let body = self.kind.delete_with_body.then(|| self.to_json());
        tracing::debug!("delete {} at {}", self.kind.name, url);

        codec::send(
            self.transport.as_ref(),
            ResourceOperation::Delete.default_http_method(),
            &url,
            &[],
            body,
        )
        .await?;

        self.payload.clear();
        self.relations.clear();
        self.state = InflationState::Invalidated;
        Ok(())
    }

    /// Returns the collection behind a relationship field.
    ///
    /// Dependent relationships are built from the payload, fetching the
    /// model first if the field is not loaded. Independent relationships
    /// are fetched from beneath this model's URL. Either way the collection
    /// is cached until the field is replaced or the model is reloaded.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::FieldNotFound`] if `field` is not a relationship
    /// - [`ResourceError::RelationshipNotLoaded`] if a dependent field is
    ///   missing even after fetching
    /// - [`ResourceError::InsufficientIdentity`] if an independent
    ///   relationship is requested on an unaddressable model
    pub async fn relationship(&mut self, field: &str) -> Result<&mut ModelCollection, ResourceError> {
        let relationship = self
            .kind
            .relationship(field)
            .ok_or_else(|| self.field_not_found(field))?;
        let key = relationship.field;

        if !self.relations.contains_key(key) {
            match relationship.dependence {
                Dependence::Dependent => {
                    if !self.payload.contains_key(key) {
                        let loaded = self.get(key).await.map(|_| ());
                        match loaded {
                            Ok(()) => {}
                            Err(ResourceError::FieldNotFound { .. }) => {
                                return Err(self.relationship_not_loaded(key))
                            }
                            Err(e) => return Err(e),
                        }
                    }
                    if !self.relations.contains_key(key) {
                        let value = self.payload.get(key).cloned().unwrap_or(Value::Null);
                        let collection = ModelCollection::from_parent(
                            self.kind,
                            relationship,
                            Arc::clone(&self.transport),
                            self.nested_owner(),
                            &value,
                        )?;
                        self.relations.insert(key, collection);
                    }
                }
                Dependence::Independent => {
                    let owner = self.url.clone().ok_or(ResourceError::InsufficientIdentity {
                        resource: self.kind.name,
                    })?;
                    let mut collection =
                        ModelCollection::new(relationship.kind, Arc::clone(&self.transport), owner);
                    collection.refresh().await?;
                    self.relations.insert(key, collection);
                }
            }
        }

        let resource = self.kind.name;
        self.relations
            .get_mut(key)
            .ok_or_else(|| ResourceError::RelationshipNotLoaded {
                resource,
                field: key.to_string(),
            })
    }

    /// Returns a model of a relationship's kind addressed beneath this one.
    ///
    /// Nothing is fetched. With an identifier the model is keyed
    /// (`{url}/{path}/{identifier}`); without one it is detached and
    /// can only be created.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::FieldNotFound`] if `field` is not a
    /// relationship, or [`ResourceError::InsufficientIdentity`] if this
    /// model has no URL.
    pub fn related(&self, field: &str, identifier: Option<&str>) -> Result<Self, ResourceError> {
        let relationship = self
            .kind
            .relationship(field)
            .ok_or_else(|| self.field_not_found(field))?;
        let owner = self.url.as_deref().ok_or(ResourceError::InsufficientIdentity {
            resource: self.kind.name,
        })?;
        let identity = identifier.map_or(Identity::Detached, |id| Identity::Key(id.to_string()));
        let mut model = Self::new(relationship.kind, Arc::clone(&self.transport), owner, identity);
        if let (Some(pk), Some(id)) = (relationship.kind.primary_key, identifier) {
            model.payload.insert(pk.to_string(), Value::String(id.to_string()));
        }
        Ok(model)
    }

    /// Returns the payload with edits to dependent relationships folded in.
    #[must_use]
    pub fn current_payload(&self) -> Map<String, Value> {
        let mut payload = self.payload.clone();
        for (field, collection) in &self.relations {
            if collection.is_dependent() && payload.contains_key(*field) {
                payload.insert((*field).to_string(), collection.to_value());
            }
        }
        payload
    }

    /// Returns the model as it would be sent to the server.
    #[must_use]
    pub fn to_json(&self) -> Value {
        codec::wrap_envelope(self.kind, self.current_payload())
    }

    /// Projects the payload onto the kind's declared fields.
    #[must_use]
    pub fn projection(&self) -> Value {
        codec::project(self.kind, &self.current_payload())
    }

    pub(crate) fn matches(&self, filters: &Map<String, Value>) -> bool {
        filters
            .iter()
            .all(|(field, expected)| self.payload.get(field) == Some(expected))
    }

    fn nested_owner(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.owner_url)
    }

    fn wrap_relations(&mut self) {
        for relationship in self.kind.relationships {
            if relationship.dependence != Dependence::Dependent {
                continue;
            }
            let Some(value) = self.payload.get(relationship.field) else {
                continue;
            };
            match ModelCollection::from_parent(
                self.kind,
                relationship,
                Arc::clone(&self.transport),
                self.nested_owner(),
                value,
            ) {
                Ok(collection) => {
                    self.relations.insert(relationship.field, collection);
                }
                Err(e) => {
                    tracing::debug!(
                        "Not wrapping {}.{}: {}",
                        self.kind.name,
                        relationship.field,
                        e
                    );
                }
            }
        }
    }

    fn field_not_found(&self, field: &str) -> ResourceError {
        ResourceError::FieldNotFound {
            resource: self.kind.name,
            field: field.to_string(),
        }
    }

    fn relationship_not_loaded(&self, field: &str) -> ResourceError {
        ResourceError::RelationshipNotLoaded {
            resource: self.kind.name,
            field: field.to_string(),
        }
    }
}
