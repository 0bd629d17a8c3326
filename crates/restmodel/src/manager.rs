//! Collection-level operations for one resource type.

use std::marker::PhantomData;

use restmodel_core::{Resource, Result, Value};
use restmodel_http::{HttpTransport, Transport};

use crate::client::RestClient;

/// Collection-level operations scoped to one resource type.
///
/// A manager is bound to its resource type at construction and never
/// rebound; it borrows the client for its plumbing.
#[derive(Debug)]
pub struct Manager<'client, R: Resource + Default, T: Transport = HttpTransport> {
    client: &'client RestClient<T>,
    _resource: PhantomData<fn() -> R>,
}

impl<'client, R: Resource + Default, T: Transport> Manager<'client, R, T> {
    /// Bind a manager to a resource type.
    pub fn new(client: &'client RestClient<T>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Fetch every object in the collection.
    pub fn all(&self) -> Result<Vec<R>> {
        self.client.list::<R>()
    }

    /// Fetch one object by id.
    pub fn get(&self, id: impl Into<Value>) -> Result<R> {
        self.client.fetch(id)
    }

    /// Create the given instance and return it persisted.
    pub fn create(&self, mut resource: R) -> Result<R> {
        self.client.create(&mut resource)?;
        Ok(resource)
    }
}
