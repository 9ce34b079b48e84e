use kinema_core::{MediaFormat, TransportMode};
use kinema_platform::PlatformCaps;
use tracing::debug;
use url::Url;

use crate::{
    config::ProxyEndpoints,
    error::{SourceError, SourceResult},
    format::classify,
};

/// Outcome of resolving a source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Transport chosen for this attempt.
    pub mode: TransportMode,
    /// Container family of the underlying media.
    pub format: MediaFormat,
    /// URL the engine (or the frame) loads.
    pub url: Url,
    /// Source as given, made absolute against the page URL.
    pub original: Url,
}

/// Pure, deterministic source resolver.
#[derive(Clone, Debug, Default)]
pub struct SourceResolver {
    endpoints: ProxyEndpoints,
}

impl SourceResolver {
    #[must_use]
    pub fn new(endpoints: ProxyEndpoints) -> Self {
        Self { endpoints }
    }

    #[must_use]
    pub fn endpoints(&self) -> &ProxyEndpoints {
        &self.endpoints
    }

    /// Resolve `source` (absolute or page-relative) with an optional token.
    ///
    /// Rules, first match wins:
    /// 1. already routed through one of the proxies → direct;
    /// 2. embed page → iframe;
    /// 3. HLS with a non-empty token → tokenized proxy;
    /// 4. insecure source on a secure page, or any source on mobile → rewriting proxy;
    /// 5. otherwise → direct.
    pub fn resolve(
        &self,
        source: &str,
        token: Option<&str>,
        caps: &PlatformCaps,
    ) -> SourceResult<ResolvedSource> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(SourceError::Empty);
        }

        let original = caps
            .page_url
            .join(trimmed)
            .map_err(|e| SourceError::InvalidUrl {
                input: trimmed.to_string(),
                reason: e.to_string(),
            })?;
        let rewrite = endpoint_url(caps, &self.endpoints.rewrite)?;
        let token_proxy = endpoint_url(caps, &self.endpoints.token)?;

        let resolved = if same_endpoint(&original, &token_proxy) {
            Self::direct(original, MediaFormat::Hls)
        } else if same_endpoint(&original, &rewrite) {
            let format = proxied_target(&original)
                .map_or(MediaFormat::Hls, |inner| match classify(&inner) {
                    MediaFormat::Embed => MediaFormat::Hls,
                    other => other,
                });
            Self::direct(original, format)
        } else {
            self.route(original, token, caps, rewrite, token_proxy)
        };

        debug!(
            mode = ?resolved.mode,
            format = ?resolved.format,
            url = %resolved.url,
            "source resolved"
        );
        Ok(resolved)
    }

    fn route(
        &self,
        original: Url,
        token: Option<&str>,
        caps: &PlatformCaps,
        mut rewrite: Url,
        mut token_proxy: Url,
    ) -> ResolvedSource {
        let format = classify(&original);
        if format == MediaFormat::Embed {
            return ResolvedSource {
                mode: TransportMode::Iframe,
                format,
                url: original.clone(),
                original,
            };
        }

        let token = token.map(str::trim).filter(|t| !t.is_empty());
        if let (MediaFormat::Hls, Some(token)) = (format, token) {
            token_proxy.query_pairs_mut().append_pair("token", token);
            return ResolvedSource {
                mode: TransportMode::TokenProxy,
                format,
                url: token_proxy,
                original,
            };
        }

        let mixed_content = caps.page_is_secure() && original.scheme() == "http";
        if mixed_content || caps.mobile {
            {
                let mut query = rewrite.query_pairs_mut();
                query.append_pair("url", original.as_str());
                if self.endpoints.ad_free {
                    query.append_pair("adFree", "true");
                }
            }
            return ResolvedSource {
                mode: TransportMode::RewriteProxy,
                format,
                url: rewrite,
                original,
            };
        }

        Self::direct(original, format)
    }

    fn direct(original: Url, format: MediaFormat) -> ResolvedSource {
        ResolvedSource {
            mode: TransportMode::Direct,
            format,
            url: original.clone(),
            original,
        }
    }
}

fn endpoint_url(caps: &PlatformCaps, endpoint: &str) -> SourceResult<Url> {
    caps.page_url
        .join(endpoint)
        .map_err(|e| SourceError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
}

fn same_endpoint(url: &Url, endpoint: &Url) -> bool {
    url.scheme() == endpoint.scheme()
        && url.host_str() == endpoint.host_str()
        && url.port_or_known_default() == endpoint.port_or_known_default()
        && url.path() == endpoint.path()
}

fn proxied_target(url: &Url) -> Option<Url> {
    url.query_pairs()
        .find(|(k, _)| k == "url")
        .and_then(|(_, v)| Url::parse(&v).ok())
}
