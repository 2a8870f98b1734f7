//! Request URL signing
//!
//! PTV authenticates every call with a developer id sent as `devid` and an
//! HMAC-SHA1 signature of the path and query, keyed by the developer key.
//! The signature is the uppercase hex digest appended as `signature`.

use std::fmt;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

use crate::config::PtvConfig;
use crate::endpoint::{Endpoint, placeholders_in};
use crate::error::PtvError;
use crate::params::QueryParams;
use crate::request::PtvRequest;

type HmacSha1 = Hmac<Sha1>;

/// Default PTV Timetable API host
pub const DEFAULT_HOST: &str = "timetableapi.ptv.vic.gov.au";

/// URL scheme of generated requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `https://` (default)
    #[default]
    Https,
    /// `http://`
    Http,
}

impl Scheme {
    /// Scheme name without separator
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

/// A fully qualified, signed request URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    url: String,
    origin_len: usize,
    signing_input_len: usize,
}

impl SignedUrl {
    /// The complete URL
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Path and query the signature was computed over
    #[must_use]
    pub fn signing_input(&self) -> &str {
        &self.url[self.origin_len..self.origin_len + self.signing_input_len]
    }

    /// Uppercase hex signature
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.url[self.origin_len + self.signing_input_len + "&signature=".len()..]
    }

    /// Consume into the URL string
    #[must_use]
    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl AsRef<str> for SignedUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// Builds signed request URLs from developer credentials
///
/// Signing is a pure function of the credentials, scheme, host and request:
/// the signer keeps no per-request state and can be shared freely once
/// configured.
#[derive(Clone, Default)]
pub struct UrlSigner {
    developer_id: Option<String>,
    developer_key: Option<SecretString>,
    scheme: Scheme,
    host: Option<String>,
}

impl fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner")
            .field("developer_id", &self.developer_id)
            .field("developer_key", &self.developer_key.as_ref().map(|_| "[REDACTED]"))
            .field("scheme", &self.scheme)
            .field("host", &self.host())
            .finish()
    }
}

impl UrlSigner {
    /// Create a signer with no credentials, HTTPS and the default host
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signer from configuration
    #[must_use]
    pub fn from_config(config: &PtvConfig) -> Self {
        Self {
            developer_id: config.developer_id.clone(),
            developer_key: config.developer_key.clone(),
            scheme: if config.use_https {
                Scheme::Https
            } else {
                Scheme::Http
            },
            host: Some(config.host.clone()),
        }
    }

    /// Set the developer id (builder style)
    #[must_use]
    pub fn with_developer_id(mut self, developer_id: impl Into<String>) -> Self {
        self.set_developer_id(developer_id);
        self
    }

    /// Set the developer key (builder style)
    #[must_use]
    pub fn with_developer_key(mut self, developer_key: impl Into<String>) -> Self {
        self.set_developer_key(developer_key);
        self
    }

    /// Set the developer id
    pub fn set_developer_id(&mut self, developer_id: impl Into<String>) {
        self.developer_id = Some(developer_id.into());
    }

    /// Set the developer key
    pub fn set_developer_key(&mut self, developer_key: impl Into<String>) {
        self.developer_key = Some(SecretString::from(developer_key.into()));
    }

    /// Generate plain `http://` URLs from now on
    pub fn dont_use_https(&mut self) {
        self.scheme = Scheme::Http;
    }

    /// Select the URL scheme (builder style)
    #[must_use]
    pub const fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Override the API host, e.g. `127.0.0.1:8080` (builder style)
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Current scheme
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Current host
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Base URL prepended to every signed path
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme.as_str(), self.host())
    }

    /// Sign a request descriptor
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::ConfigurationError`] if credentials are unset or a
    /// path placeholder was left unfilled.
    pub fn sign(&self, request: &PtvRequest) -> Result<SignedUrl, PtvError> {
        let path_params: Vec<(&str, &str)> = request
            .path_params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.generate_endpoint_url(
            request.endpoint().name(),
            &path_params,
            request.query_params(),
        )
    }

    /// Build and sign the URL for an endpoint given by logical name
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::ConfigurationError`] if credentials are unset, the
    /// endpoint is unknown, or a path placeholder was left unfilled.
    pub fn generate_endpoint_url(
        &self,
        endpoint_name: &str,
        path_params: &[(&str, &str)],
        query: &QueryParams,
    ) -> Result<SignedUrl, PtvError> {
        let (developer_id, developer_key) = self.credentials()?;
        let endpoint = Endpoint::lookup(endpoint_name)?;

        let path = fill_template(endpoint.template(), path_params).map_err(|missing| {
            PtvError::configuration(format!(
                "unresolved placeholder {{{missing}}} for endpoint {endpoint}"
            ))
        })?;

        let mut pairs = Vec::with_capacity(query.len() + 1);
        pairs.push(format!("devid={developer_id}"));
        pairs.extend(query.encoded_pairs());

        let signing_input = format!("{path}?{}", pairs.join("&"));
        let signature = compute_signature(&signing_input, developer_key)?;

        let origin = self.base_url();
        Ok(SignedUrl {
            url: format!("{origin}{signing_input}&signature={signature}"),
            origin_len: origin.len(),
            signing_input_len: signing_input.len(),
        })
    }

    /// Signature for an arbitrary path and query, keyed by the developer key
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::ConfigurationError`] if the developer key is unset.
    pub fn signature(&self, signing_input: &str) -> Result<String, PtvError> {
        compute_signature(signing_input, self.developer_key()?)
    }

    fn credentials(&self) -> Result<(&str, &str), PtvError> {
        let developer_id = self
            .developer_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PtvError::configuration("PTV developer ID not set"))?;
        Ok((developer_id, self.developer_key()?))
    }

    fn developer_key(&self) -> Result<&str, PtvError> {
        self.developer_key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PtvError::configuration("PTV developer key not set"))
    }
}

/// Splice path values into a template in one pass
///
/// Values are inserted verbatim and never rescanned. Returns the name of the
/// first placeholder with no supplied value.
fn fill_template<'a>(
    template: &'a str,
    path_params: &[(&str, &str)],
) -> Result<String, &'a str> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    for name in placeholders_in(template) {
        let token = format!("{{{name}}}");
        let Some(start) = rest.find(&token) else {
            break;
        };
        let value = path_params
            .iter()
            .find_map(|(k, v)| (*k == name).then_some(*v))
            .ok_or(name)?;
        path.push_str(&rest[..start]);
        path.push_str(value);
        rest = &rest[start + token.len()..];
    }
    path.push_str(rest);
    Ok(path)
}

/// Uppercase hex HMAC-SHA1 of `data`
fn compute_signature(data: &str, key: &str) -> Result<String, PtvError> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PtvError::configuration(format!("invalid developer key: {e}")))?;
    mac.update(data.as_bytes());
    Ok(hex::encode_upper(mac.finalize().into_bytes()))
}
