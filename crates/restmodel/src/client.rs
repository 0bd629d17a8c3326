//! The request cycle: URL construction, parameter rendering, dispatch.

use restmodel_core::{Error, JsonMap, Resource, Result, TransportError, Value, parse_envelope};
use restmodel_http::{ClientConfig, HttpTransport, Method, RawResponse, Request, Transport};

use crate::manager::Manager;

/// Executes resource operations against a transport.
///
/// The client owns the configuration (default domain, common-parameters
/// hook, wire log) and builds one request per operation; every transport
/// or envelope failure surfaces immediately to the caller.
#[derive(Debug)]
pub struct RestClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl RestClient<HttpTransport> {
    /// Create a client with the blocking HTTP transport.
    pub fn new(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self { config, transport }
    }
}

impl<T: Transport> RestClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get a manager bound to one resource type.
    pub fn manager<R: Resource + Default>(&self) -> Manager<'_, R, T> {
        Manager::new(self)
    }

    /// Fetch one resource by id into a fresh instance.
    pub fn fetch<R: Resource + Default>(&self, id: impl Into<Value>) -> Result<R> {
        let mut resource = R::default();
        resource.apply_defaults()?;
        self.refresh(&mut resource, id)?;
        Ok(resource)
    }

    /// Re-hydrate an existing instance from the backend.
    pub fn refresh<R: Resource>(&self, resource: &mut R, id: impl Into<Value>) -> Result<()> {
        let id = id.into();
        let url = self.instance_url::<R>(&id)?;
        let raw = self.execute(Method::Get, url, Vec::new())?;
        let object = expect_object(parse_envelope(&raw.body)?)?;
        resource.apply_object(&object)
    }

    /// List the whole collection as hydrated instances.
    pub fn list<R: Resource + Default>(&self) -> Result<Vec<R>> {
        let url = self.collection_url::<R>()?;
        let raw = self.execute(Method::Get, url, Vec::new())?;
        let value = parse_envelope(&raw.body)?;
        let serde_json::Value::Array(items) = value else {
            return Err(Error::fail(format!(
                "response object must be a list, not '{}'",
                json_type_name(&value)
            )));
        };
        items
            .iter()
            .map(|item| match item {
                serde_json::Value::Object(map) => R::from_object(map),
                other => Err(Error::fail(format!(
                    "list element must be an object, not '{}'",
                    json_type_name(other)
                ))),
            })
            .collect()
    }

    /// Create the resource and mirror server-assigned fields back.
    pub fn create<R: Resource>(&self, resource: &mut R) -> Result<()> {
        let url = self.collection_url::<R>()?;
        let raw = self.execute(Method::Post, url, resource.to_params())?;
        let object = expect_object(parse_envelope(&raw.body)?)?;
        resource.apply_object(&object)
    }

    /// Update the resource at its own URL.
    ///
    /// The response body is not re-hydrated; PUT responses may be empty, so
    /// only the status is checked.
    pub fn save<R: Resource>(&self, resource: &R) -> Result<()> {
        let url = self.instance_url::<R>(&resource.id_value())?;
        let raw = self.execute(Method::Put, url, resource.to_params())?;
        ensure_success(&raw)
    }

    /// Delete the resource at its own URL and null out its id.
    pub fn delete<R: Resource>(&self, resource: &mut R) -> Result<()> {
        let url = self.instance_url::<R>(&resource.id_value())?;
        let raw = self.execute(Method::Delete, url, Vec::new())?;
        ensure_success(&raw)?;
        resource.clear_id()
    }

    fn execute(
        &self,
        method: Method,
        url: String,
        params: Vec<(&'static str, Value)>,
    ) -> Result<RawResponse> {
        let rendered = params
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_param()))
            .collect();
        let params = self.config.apply_params_hook(rendered);
        tracing::debug!(method = method.as_str(), url = %url, "dispatching request");
        self.transport.send(&Request {
            method,
            url,
            params,
        })
    }

    fn base_url<R: Resource>(&self) -> Result<String> {
        let domain = match R::rest_domain() {
            Some(domain) => domain,
            None => self.config.domain().ok_or_else(|| {
                Error::config(
                    "no domain configured: set ClientConfig::domain or Resource::rest_domain",
                )
            })?,
        };
        if domain.starts_with("http://") || domain.starts_with("https://") {
            Ok(domain.trim_end_matches('/').to_string())
        } else {
            Ok(format!("http://{}", domain.trim_end_matches('/')))
        }
    }

    fn collection_url<R: Resource>(&self) -> Result<String> {
        Ok(join_url(&self.base_url::<R>()?, R::RESOURCE_PATH))
    }

    fn instance_url<R: Resource>(&self, id: &Value) -> Result<String> {
        if id.is_null() {
            return Err(Error::MissingId(resource_name::<R>()));
        }
        Ok(join_url(&self.collection_url::<R>()?, &id.to_param()))
    }
}

/// Join two URL parts with exactly one separating slash.
fn join_url(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}

fn resource_name<R>() -> &'static str {
    std::any::type_name::<R>()
        .rsplit("::")
        .next()
        .unwrap_or("resource")
}

fn expect_object(value: serde_json::Value) -> Result<JsonMap> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(Error::fail(format!(
            "response object must be an object, not '{}'",
            json_type_name(&other)
        ))),
    }
}

fn ensure_success(raw: &RawResponse) -> Result<()> {
    if raw.is_success() {
        Ok(())
    } else {
        Err(Error::Transport(TransportError {
            message: format!("request returned HTTP {}: {}", raw.status, raw.body),
            status: Some(raw.status),
            source: None,
        }))
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_guarantees_a_single_slash() {
        assert_eq!(join_url("http://h/api/cars", "7"), "http://h/api/cars/7");
        assert_eq!(join_url("http://h/api/cars/", "7"), "http://h/api/cars/7");
        assert_eq!(join_url("http://h", "/api/cars"), "http://h/api/cars");
        assert_eq!(join_url("http://h/", "api/cars"), "http://h/api/cars");
    }

    #[test]
    fn expect_object_rejects_scalars_and_arrays() {
        assert!(expect_object(serde_json::json!({"a": 1})).is_ok());
        assert!(expect_object(serde_json::json!([1])).is_err());
        assert!(expect_object(serde_json::json!(1)).is_err());
    }

    #[test]
    fn ensure_success_maps_status_into_the_error() {
        let raw = RawResponse {
            status: 500,
            body: "boom".to_string(),
        };
        match ensure_success(&raw) {
            Err(Error::Transport(e)) => {
                assert_eq!(e.status, Some(500));
                assert!(e.message.contains("boom"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn resource_name_strips_the_module_path() {
        struct Car;
        assert_eq!(resource_name::<Car>(), "Car");
    }
}
