//! Groups of resources sharing a kind and an owner.
//!
//! A [`ModelCollection`] is the list side of a resource kind. How it obtains
//! members depends on the kind's [`CollectionFlavor`]:
//!
//! | Flavor                | `filter(params)` does                               |
//! |-----------------------|-----------------------------------------------------|
//! | `Queryable`           | GET `{url}?{params}`                                |
//! | `BulkBatched`         | GET `{url}?{params}`, plus whole-collection writes  |
//! | `LiteralSeeded`       | holds `params` as a single detached member          |
//! | `IdentifierAddressed` | rejected, use [`ModelCollection::lookup`]           |
//! | `Dependent`           | keeps members of the parent payload matching params |
//!
//! Members are fetched at most once per filter; [`ModelCollection::refresh`]
//! refetches and replaces them. Filtering a dependent collection only narrows
//! the view: members it hides are kept, with their edits, and are still
//! encoded back into the parent.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let mut bulk = atlas.entity_bulk();
//! bulk.filter(json!({"guid": ["A", "B"]}).as_object().cloned().unwrap()).await?;
//! for batch in bulk.iter_mut() {
//!     for entity in batch.relationship("entities").await?.iter_mut() {
//!         println!("{}", entity.get("version").await?);
//!     }
//! }
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::Transport;
use crate::rest::codec;
use crate::rest::errors::ResourceError;
use crate::rest::kind::{CollectionFlavor, Relationship, ResourceKind};
use crate::rest::model::{Identity, Model};
use crate::rest::path::{query_pairs, resource_url, unique_attribute_url, ResourceOperation};

/// The JSON shape members were loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Array,
    Object,
    Null,
}

/// A collection of models of one kind.
#[derive(Debug, Clone)]
pub struct ModelCollection {
    kind: &'static ResourceKind,
    transport: Arc<dyn Transport>,
    owner_url: String,
    url: String,
    flavor: CollectionFlavor,
    members: Vec<Model>,
    // original index of each visible member
    positions: Vec<usize>,
    // dependent members excluded by the current filters
    hidden: Vec<(usize, Model)>,
    filters: Map<String, Value>,
    inflated: bool,
    source: Option<Value>,
    shape: Shape,
}

impl ModelCollection {
    /// Creates an empty, unfetched collection beneath `owner_url`.
    #[must_use]
    pub fn new(
        kind: &'static ResourceKind,
        transport: Arc<dyn Transport>,
        owner_url: impl Into<String>,
    ) -> Self {
        let owner_url = owner_url.into();
        let url = resource_url(&owner_url, kind.collection_segment(), None);
        Self {
            kind,
            transport,
            owner_url,
            url,
            flavor: kind.flavor,
            members: Vec::new(),
            positions: Vec::new(),
            hidden: Vec::new(),
            filters: Map::new(),
            inflated: false,
            source: None,
            shape: Shape::Array,
        }
    }

    /// Builds a dependent collection from a parent's field value.
    pub(crate) fn from_parent(
        parent: &'static ResourceKind,
        relationship: &Relationship,
        transport: Arc<dyn Transport>,
        owner_url: &str,
        value: &Value,
    ) -> Result<Self, ResourceError> {
        let mut collection = Self::new(relationship.kind, transport, owner_url);
        collection.flavor = CollectionFlavor::Dependent;
        collection.shape = match value {
            Value::Array(_) => Shape::Array,
            Value::Object(_) => Shape::Object,
            Value::Null => Shape::Null,
            _ => {
                return Err(ResourceError::unexpected(
                    parent.name,
                    format!("'{}' is neither an object nor an array", relationship.field),
                ))
            }
        };
        collection.source = Some(value.clone());
        let members = collection.synthesize()?;
        collection.replace_members(members);
        collection.inflated = true;
        Ok(collection)
    }

    /// Returns the collection's kind.
    #[must_use]
    pub const fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    /// Returns the collection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns how this collection obtains members.
    #[must_use]
    pub const fn flavor(&self) -> CollectionFlavor {
        self.flavor
    }

    /// Returns `true` if members come from a parent payload.
    #[must_use]
    pub fn is_dependent(&self) -> bool {
        self.flavor == CollectionFlavor::Dependent
    }

    /// Returns the filters of the last `filter` call.
    #[must_use]
    pub const fn filters(&self) -> &Map<String, Value> {
        &self.filters
    }

    /// Returns `true` once members have been loaded.
    #[must_use]
    pub const fn is_inflated(&self) -> bool {
        self.inflated
    }

    /// Returns the loaded members without fetching.
    #[must_use]
    pub fn members(&self) -> &[Model] {
        &self.members
    }

    /// Returns the number of loaded members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no members are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates loaded members without fetching.
    pub fn iter(&self) -> std::slice::Iter<'_, Model> {
        self.members.iter()
    }

    /// Iterates loaded members mutably without fetching.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Model> {
        self.members.iter_mut()
    }

    /// Returns a loaded member by position.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Model> {
        self.members.get_mut(index)
    }

    /// Consumes the collection and returns its members.
    #[must_use]
    pub fn into_members(self) -> Vec<Model> {
        self.members
    }

    /// Narrows the collection to members matching `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedRequest`] on an
    /// identifier-addressed kind or a dependent collection built without
    /// its parent payload, or the fetch error.
    pub async fn filter(&mut self, params: Map<String, Value>) -> Result<&mut Self, ResourceError> {
        self.filters = params;
        match self.flavor {
            CollectionFlavor::Queryable | CollectionFlavor::BulkBatched => {
                self.fetch().await?;
            }
            CollectionFlavor::LiteralSeeded => {
                let literal = Model::materialized(
                    self.kind,
                    Arc::clone(&self.transport),
                    &self.owner_url,
                    self.filters.clone(),
                    Identity::Detached,
                );
                self.replace_members(vec![literal]);
                self.inflated = true;
            }
            CollectionFlavor::IdentifierAddressed => {
                return Err(ResourceError::malformed(
                    self.kind.name,
                    "look up by type name and unique attributes instead of filtering",
                ));
            }
            CollectionFlavor::Dependent => self.narrow()?,
        }
        Ok(self)
    }

    /// Returns all members, fetching once if nothing is loaded yet.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedRequest`] on an
    /// identifier-addressed kind or a dependent collection built without
    /// its parent payload, or the fetch error.
    pub async fn all(&mut self) -> Result<&mut [Model], ResourceError> {
        if !self.inflated {
            match self.flavor {
                CollectionFlavor::Queryable | CollectionFlavor::BulkBatched => self.fetch().await?,
                CollectionFlavor::IdentifierAddressed => {
                    return Err(ResourceError::malformed(
                        self.kind.name,
                        "cannot list an identifier-addressed collection",
                    ))
                }
                CollectionFlavor::LiteralSeeded => self.inflated = true,
                CollectionFlavor::Dependent => {
                    self.require_source()?;
                    self.inflated = true;
                }
            }
        }
        Ok(&mut self.members)
    }

    /// Refetches members with the current filters, replacing the old ones.
    ///
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn refresh(&mut self) -> Result<&mut Self, ResourceError> {
        self.inflated = false;
        let filters = std::mem::take(&mut self.filters);
        self.filter(filters).await
    }

    /// Returns an unloaded model for one member, addressed by identifier.
    ///
    /// For identifier-addressed kinds `identifier` is the type name and
    /// `params` are the unique attributes (`attr:` pairs). For keyed kinds
    /// `params` become the member's fetch query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedRequest`] when the kind has no
    /// primary key, or when unique attributes are required and missing.
    pub fn lookup(&self, identifier: &str, params: &Map<String, Value>) -> Result<Model, ResourceError> {
        if self.flavor == CollectionFlavor::IdentifierAddressed {
            if params.is_empty() {
                return Err(ResourceError::malformed(
                    self.kind.name,
                    "at least one unique attribute is required",
                ));
            }
            let url = unique_attribute_url(&self.url, identifier, &query_pairs(params));
            return Ok(Model::new(
                self.kind,
                Arc::clone(&self.transport),
                &self.owner_url,
                Identity::Url(url),
            ));
        }
        Ok(self.model(identifier)?.with_query(query_pairs(params)))
    }

    /// Returns an unloaded member keyed by `identifier`. Nothing is fetched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedRequest`] when the kind has no
    /// primary key or `identifier` is empty.
    pub fn model(&self, identifier: &str) -> Result<Model, ResourceError> {
        let pk = self.kind.primary_key.ok_or_else(|| {
            ResourceError::malformed(self.kind.name, "kind is not addressable by identifier")
        })?;
        if identifier.is_empty() {
            return Err(ResourceError::malformed(self.kind.name, "identifier must not be empty"));
        }
        let mut seed = Map::new();
        seed.insert(pk.to_string(), Value::String(identifier.to_string()));
        Ok(Model::new(
            self.kind,
            Arc::clone(&self.transport),
            &self.owner_url,
            Identity::Key(identifier.to_string()),
        )
        .with_payload(seed))
    }

    /// Creates a new member on the server and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] if the kind cannot be
    /// created, or the transport error.
    pub async fn create(
        &self,
        identifier: Option<&str>,
        fields: Map<String, Value>,
    ) -> Result<Model, ResourceError> {
        let mut model = match identifier {
            Some(id) if self.kind.primary_key.is_some() => self.model(id)?,
            _ => Model::new(
                self.kind,
                Arc::clone(&self.transport),
                &self.owner_url,
                Identity::Detached,
            ),
        };
        model.create(fields).await?;
        Ok(model)
    }

    /// Creates members in one request and returns the server's response.
    ///
    /// Without an explicit payload the body is built from the loaded
    /// members' projections. Loaded members are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] if the kind has no
    /// bulk create, or the transport error.
    pub async fn bulk_create(&self, payload: Option<Value>) -> Result<Value, ResourceError> {
        self.bulk(ResourceOperation::Create, payload).await
    }

    /// Updates members in one request and returns the server's response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] if the kind has no
    /// bulk update, or the transport error.
    pub async fn bulk_update(&self, payload: Option<Value>) -> Result<Value, ResourceError> {
        self.bulk(ResourceOperation::Update, payload).await
    }

    /// Deletes the filtered members in one request.
    ///
    /// The current filters are sent as the query; a body is sent only when
    /// one is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] if the kind has no
    /// bulk delete, or the transport error.
    pub async fn bulk_delete(&self, payload: Option<Value>) -> Result<Value, ResourceError> {
        self.bulk(ResourceOperation::Delete, payload).await
    }

    async fn bulk(
        &self,
        operation: ResourceOperation,
        payload: Option<Value>,
    ) -> Result<Value, ResourceError> {
        if !self.kind.allows_bulk(operation) {
            return Err(ResourceError::unsupported(self.kind.name, operation.as_str()));
        }
        let (query, body) = match operation {
            ResourceOperation::Delete => (query_pairs(&self.filters), payload),
            _ => (Vec::new(), Some(payload.unwrap_or_else(|| self.bulk_body()))),
        };
        tracing::debug!("bulk {} {} at {}", operation.as_str(), self.kind.name, self.url);

        let response = codec::send(
            self.transport.as_ref(),
            operation.default_http_method(),
            &self.url,
            &query,
            body,
        )
        .await?;
        response
            .into_json()
            .ok_or_else(|| ResourceError::unexpected(self.kind.name, "expected JSON, got an archive"))
    }

    fn bulk_body(&self) -> Value {
        if let (Shape::Object, [single]) = (self.shape, self.members.as_slice()) {
            return single.projection();
        }
        let projections: Vec<Value> = self.members.iter().map(Model::projection).collect();
        match self.kind.bulk_key {
            Some(key) => {
                let mut body = Map::new();
                body.insert(key.to_string(), Value::Array(projections));
                Value::Object(body)
            }
            None => Value::Array(projections),
        }
    }

    /// Returns the members in the shape they were loaded in.
    ///
    /// Dependent members hidden by a filter are included, in their original
    /// order.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let everything = self.everything();
        match (self.shape, everything.as_slice()) {
            (Shape::Object, [single]) => single.to_json(),
            (Shape::Null, []) => Value::Null,
            _ => Value::Array(everything.iter().map(|member| member.to_json()).collect()),
        }
    }

    fn everything(&self) -> Vec<&Model> {
        let mut indexed: Vec<(usize, &Model)> = self
            .positions
            .iter()
            .copied()
            .zip(self.members.iter())
            .chain(self.hidden.iter().map(|(position, member)| (*position, member)))
            .collect();
        indexed.sort_by_key(|(position, _)| *position);
        indexed.into_iter().map(|(_, member)| member).collect()
    }

    fn replace_members(&mut self, members: Vec<Model>) {
        self.positions = (0..members.len()).collect();
        self.hidden.clear();
        self.members = members;
    }

    /// Re-splits every dependent member into visible and hidden by the
    /// current filters.
    fn narrow(&mut self) -> Result<(), ResourceError> {
        self.require_source()?;
        let mut indexed: Vec<(usize, Model)> = self
            .positions
            .drain(..)
            .zip(self.members.drain(..))
            .chain(self.hidden.drain(..))
            .collect();
        indexed.sort_by_key(|(position, _)| *position);

        for (position, member) in indexed {
            if member.matches(&self.filters) {
                self.positions.push(position);
                self.members.push(member);
            } else {
                self.hidden.push((position, member));
            }
        }
        self.inflated = true;
        Ok(())
    }

    fn require_source(&self) -> Result<(), ResourceError> {
        if self.source.is_some() {
            return Ok(());
        }
        Err(ResourceError::malformed(
            self.kind.name,
            "dependent collection has no parent payload, reach it through the parent's relationship",
        ))
    }

    async fn fetch(&mut self) -> Result<(), ResourceError> {
        let query = query_pairs(&self.filters);
        let body = codec::send(
            self.transport.as_ref(),
            ResourceOperation::Filter.default_http_method(),
            &self.url,
            &query,
            None,
        )
        .await?;
        let value = body
            .into_json()
            .ok_or_else(|| ResourceError::unexpected(self.kind.name, "expected JSON, got an archive"))?;

        let value = codec::unwrap_envelope(self.kind, value);
        self.shape = match value {
            Value::Object(_) => Shape::Object,
            _ => Shape::Array,
        };
        let members = match value {
            Value::Array(items) => self.members_from(items)?,
            Value::Object(payload) => vec![Model::materialized(
                self.kind,
                Arc::clone(&self.transport),
                &self.owner_url,
                payload,
                Identity::Url(self.url.clone()),
            )
            .with_query(query)],
            Value::Null => Vec::new(),
            other => {
                return Err(ResourceError::unexpected(
                    self.kind.name,
                    format!("expected an object or array, got {other}"),
                ))
            }
        };
        self.replace_members(members);
        self.inflated = true;
        tracing::debug!("Loaded {} {} members", self.members.len(), self.kind.name);
        Ok(())
    }

    fn synthesize(&self) -> Result<Vec<Model>, ResourceError> {
        self.require_source()?;
        match &self.source {
            Some(Value::Array(items)) => self.members_from(items.clone()),
            Some(Value::Object(payload)) => Ok(vec![Model::materialized(
                self.kind,
                Arc::clone(&self.transport),
                &self.owner_url,
                payload.clone(),
                Identity::Detached,
            )]),
            _ => Ok(Vec::new()),
        }
    }

    fn members_from(&self, items: Vec<Value>) -> Result<Vec<Model>, ResourceError> {
        items
            .into_iter()
            .map(|item| match item {
                Value::Object(payload) => Ok(Model::materialized(
                    self.kind,
                    Arc::clone(&self.transport),
                    &self.owner_url,
                    payload,
                    Identity::Detached,
                )),
                other => Err(ResourceError::unexpected(
                    self.kind.name,
                    format!("expected member objects, got {other}"),
                )),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ModelCollection {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<'a> IntoIterator for &'a mut ModelCollection {
    type Item = &'a mut Model;
    type IntoIter = std::slice::IterMut<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter_mut()
    }
}
