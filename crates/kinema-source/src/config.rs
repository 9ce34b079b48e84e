use derivative::Derivative;
use derive_setters::Setters;
use serde::Deserialize;

/// Proxy endpoints the resolver routes through.
///
/// Endpoints may be absolute or relative to the page URL.
#[derive(Clone, Debug, Derivative, Deserialize, Setters)]
#[derivative(Default)]
#[serde(default, rename_all = "camelCase")]
#[setters(prefix = "with_", into)]
pub struct ProxyEndpoints {
    /// Rewriting proxy accepting `?url=<encoded source>`.
    #[derivative(Default(value = "\"/api/proxy\".to_string()"))]
    pub rewrite: String,
    /// Tokenized manifest proxy accepting `?token=<opaque>`.
    #[derivative(Default(value = "\"/api/stream\".to_string()"))]
    pub token: String,
    /// Ask the rewriting proxy to strip ad segments (`&adFree=true`).
    pub ad_free: bool,
}
