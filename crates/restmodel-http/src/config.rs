//! Client configuration.
//!
//! Replaces process-wide settings with an explicit struct handed to the
//! client at construction. The common-parameters hook is a plain injected
//! function value applied to every outbound parameter list.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outbound parameters in declaration order.
pub type Params = Vec<(String, String)>;

/// Hook that may inject common parameters (API keys, session tokens).
pub type ParamsHook = Arc<dyn Fn(Params) -> Params + Send + Sync>;

const DEFAULT_USER_AGENT: &str = concat!("restmodel/", env!("CARGO_PKG_VERSION"));

/// Configuration for a REST client.
#[derive(Clone, Default)]
pub struct ClientConfig {
    domain: Option<String>,
    user_agent: Option<String>,
    params_hook: Option<ParamsHook>,
    log_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a config builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// The default host, used when a resource declares no override.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// The User-Agent header value.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Optional wire-log destination.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Run the common-parameters hook, if configured.
    pub fn apply_params_hook(&self, params: Params) -> Params {
        match &self.params_hook {
            Some(hook) => hook(params),
            None => params,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("domain", &self.domain)
            .field("user_agent", &self.user_agent())
            .field("params_hook", &self.params_hook.as_ref().map(|_| "<fn>"))
            .field("log_path", &self.log_path)
            .finish()
    }
}

/// Builder for [`ClientConfig`] with a fluent API.
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new config builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default host (`host[:port]`, scheme optional).
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.config.domain = Some(domain.into());
        self
    }

    /// Override the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Inject a common-parameters hook applied to every request.
    #[must_use]
    pub fn params_hook(mut self, hook: impl Fn(Params) -> Params + Send + Sync + 'static) -> Self {
        self.config.params_hook = Some(Arc::new(hook));
        self
    }

    /// Log every request/response pair to the given file, best-effort.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = Some(path.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
