//! Resource trait for declarative REST model mapping.
//!
//! The `Resource` trait defines the contract for structs that map to a
//! remote collection. Each type declares a static field registry once at
//! type-definition time; hydration, defaults and outbound parameter
//! construction are provided on top of two per-field accessors (`store`
//! and `load`), so every value written to a field goes through the same
//! coercion path.

use crate::error::{CoercionError, Error, Result};
use crate::field::FieldInfo;
use crate::value::{JsonMap, Value};

/// Trait for types that map to a remote REST collection.
///
/// # Example
///
/// ```ignore
/// struct Car {
///     id: Option<i64>,
///     model: Option<String>,
/// }
///
/// impl Resource for Car {
///     const RESOURCE_PATH: &'static str = "/api/cars";
///
///     fn fields() -> &'static [FieldInfo] {
///         static FIELDS: &[FieldInfo] = &[
///             FieldInfo::new("id", FieldKind::Int).backend_generated(true),
///             FieldInfo::new("model", FieldKind::Char).max_length(100),
///         ];
///         FIELDS
///     }
///
///     fn store(&mut self, name: &str, value: Value) -> Result<()> { /* ... */ }
///     fn load(&self, name: &str) -> Value { /* ... */ }
/// }
/// ```
pub trait Resource: Sized + Send + Sync {
    /// The collection path on the remote host, e.g. `/api/cars`.
    const RESOURCE_PATH: &'static str;

    /// The field holding the remote identifier.
    const ID_FIELD: &'static str = "id";

    /// Get field metadata for all declared fields.
    fn fields() -> &'static [FieldInfo];

    /// Per-type host override; `None` falls back to the client default.
    fn rest_domain() -> Option<&'static str> {
        None
    }

    /// Write an already-coerced value into the named field.
    ///
    /// Implementations convert the value into the concrete field type and
    /// must accept every name present in [`Resource::fields`].
    fn store(&mut self, name: &str, value: Value) -> Result<()>;

    /// Read the current value of the named field.
    ///
    /// Unknown names read as [`Value::Null`].
    fn load(&self, name: &str) -> Value;

    /// Look up registry metadata by field name.
    fn field(name: &str) -> Option<&'static FieldInfo> {
        Self::fields().iter().find(|f| f.name == name)
    }

    /// Coerce a raw value through the named field and store the result.
    ///
    /// This is the single assignment path: the registry supplies the kind
    /// and constraints, the coerced value lands in the concrete field.
    fn set_field(&mut self, name: &str, raw: Value) -> Result<()> {
        let Some(info) = Self::field(name) else {
            return Err(unknown_field(std::any::type_name::<Self>(), name, raw));
        };
        let value = info.coerce(raw)?;
        self.store(name, value)
    }

    /// Fill declared defaults into fields that are still null.
    ///
    /// Explicitly assigned values win over defaults; defaults win over null.
    fn apply_defaults(&mut self) -> Result<()> {
        for info in Self::fields() {
            if !self.load(info.name).is_null() {
                continue;
            }
            if let Some(value) = info.default_value()? {
                self.store(info.name, value)?;
            }
        }
        Ok(())
    }

    /// Hydrate fields from a decoded payload object.
    ///
    /// Every registry field whose remote name appears in the payload is
    /// assigned through [`Resource::set_field`]; absent keys leave the
    /// field untouched.
    fn apply_object(&mut self, object: &JsonMap) -> Result<()> {
        for info in Self::fields() {
            if let Some(raw) = object.get(info.rest_name) {
                self.set_field(info.name, Value::from_json(raw))?;
            }
        }
        Ok(())
    }

    /// Construct a new instance hydrated from a payload object.
    fn from_object(object: &JsonMap) -> Result<Self>
    where
        Self: Default,
    {
        let mut resource = Self::default();
        resource.apply_defaults()?;
        resource.apply_object(object)?;
        Ok(resource)
    }

    /// Build the outbound parameter list, keyed by remote name.
    ///
    /// Backend-generated fields are never included; the server owns them.
    fn to_params(&self) -> Vec<(&'static str, Value)> {
        Self::fields()
            .iter()
            .filter(|f| !f.backend_generated)
            .map(|f| (f.rest_name, self.load(f.name)))
            .collect()
    }

    /// Render this resource as a payload object, keyed by remote name.
    ///
    /// Unlike [`Resource::to_params`] this includes backend-generated
    /// fields; it is the full object form used for embedded resources.
    fn to_object(&self) -> JsonMap {
        Self::fields()
            .iter()
            .map(|f| (f.rest_name.to_string(), self.load(f.name).to_json()))
            .collect()
    }

    /// Read the current id value.
    fn id_value(&self) -> Value {
        self.load(Self::ID_FIELD)
    }

    /// Null out the id field (after a successful delete).
    fn clear_id(&mut self) -> Result<()> {
        self.store(Self::ID_FIELD, Value::Null)
    }
}

/// Hydrate a typed child per element of an object array.
///
/// Used by `store` implementations whose concrete field is a vector of
/// embedded resources.
pub fn resources_from_array<R: Resource + Default>(value: &Value) -> Result<Vec<R>> {
    let Value::Array(items) = value else {
        return Err(CoercionError::new("array", value.type_name()).into());
    };
    items
        .iter()
        .map(|item| match item {
            Value::Object(map) => R::from_object(map),
            other => Err(CoercionError::new("object", other.type_name()).into()),
        })
        .collect()
}

fn unknown_field(resource: &'static str, field: &str, raw: Value) -> Error {
    CoercionError::new("declared field", raw.type_name().to_string())
        .for_field(&format!("{resource}.{field}"))
        .into()
}
