//! # RestModel
//!
//! Declarative REST resources in Rust: describe a remote collection once
//! with a field registry, then list, fetch, create, save and delete typed
//! instances against an HTTP/JSON backend that wraps every response in an
//! `ok`/`fail` envelope.
//!
//! ```ignore
//! use restmodel::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Car {
//!     id: Option<i64>,
//!     model: Option<String>,
//! }
//!
//! impl Resource for Car {
//!     const RESOURCE_PATH: &'static str = "/api/cars";
//!
//!     fn fields() -> &'static [FieldInfo] {
//!         static FIELDS: &[FieldInfo] = &[
//!             FieldInfo::new("id", FieldKind::Int).backend_generated(true),
//!             FieldInfo::new("model", FieldKind::Char).max_length(100),
//!         ];
//!         FIELDS
//!     }
//!
//!     fn store(&mut self, name: &str, value: Value) -> Result<()> {
//!         match name {
//!             "id" => self.id = value.try_into()?,
//!             "model" => self.model = value.try_into()?,
//!             _ => {}
//!         }
//!         Ok(())
//!     }
//!
//!     fn load(&self, name: &str) -> Value {
//!         match name {
//!             "id" => self.id.into(),
//!             "model" => self.model.clone().into(),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let client = RestClient::new(ClientConfig::builder().domain("api.example.com").build());
//! let cars = client.manager::<Car>().all()?;
//! ```

pub mod client;
pub mod manager;

pub use client::RestClient;
pub use manager::Manager;

pub use restmodel_core::{
    ArrayElement, ConfigError, CoercionError, Error, FailResponse, FieldInfo, FieldKind, JsonMap,
    Resource, Result, TransportError, Value, parse_envelope, resources_from_array,
};
pub use restmodel_http::{
    ClientConfig, ClientConfigBuilder, HttpTransport, Method, Params, ParamsHook, RawResponse,
    Request, Transport,
};

/// Common imports for declaring and using resources.
pub mod prelude {
    pub use crate::client::RestClient;
    pub use crate::manager::Manager;
    pub use restmodel_core::{
        ArrayElement, Error, FailResponse, FieldInfo, FieldKind, Resource, Result, Value,
    };
    pub use restmodel_http::{ClientConfig, Method, Transport};
}
