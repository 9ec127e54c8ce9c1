//! HTTP client for the cluster control-plane API.
//!
//! Every call is a single blocking round trip from the caller's point of
//! view: no retries, no batching, no caching. Failed responses are classified
//! into an [`ErrorKind`] and surfaced as [`ApiError::Remote`].

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, Result};
use crate::error_kind::ErrorKind;
use crate::reference::Reference;
use crate::types::{
    ErrorBody, LoginResponse, Namespace, NamespaceCreateOptions, Node, Policy, PolicyList, Pool,
    Rule, User, UserCreateOptions, Volume, VolumeCreateOptions,
};

/// API version used when nothing else is negotiated.
pub const DEFAULT_VERSION_STR: &str = "1";

/// Well-known control-plane port.
pub const DEFAULT_PORT: u16 = 5705;

/// Canonical form of an API version: surrounding whitespace and one leading
/// `v` removed. `None` when nothing is left.
pub fn normalize_version(version: &str) -> Option<&str> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    (!version.is_empty()).then_some(version)
}

/// Username and password presented with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// Account name.
    pub username: String,
    /// Plain-text secret, sent only in the `Authorization` header.
    pub password: String,
}

/// Versioned client bound to one control-plane address.
#[derive(Debug, Clone)]
pub struct Client {
    base: Url,
    version: String,
    http: reqwest::Client,
    auth: Option<BasicAuth>,
}

impl Client {
    /// Creates a client for `addr` (an `http://` or `https://` URL) speaking
    /// API version `version`.
    pub fn new_versioned(addr: &str, version: &str) -> Result<Self> {
        let base = Url::parse(addr).map_err(|e| ApiError::InvalidUrl {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                addr: addr.to_string(),
                reason: format!("unsupported scheme {:?}", base.scheme()),
            });
        }
        if base.host_str().map_or(true, str::is_empty) {
            return Err(ApiError::InvalidUrl {
                addr: addr.to_string(),
                reason: "missing host".to_string(),
            });
        }
        let version = normalize_version(version).ok_or_else(|| ApiError::InvalidUrl {
            addr: addr.to_string(),
            reason: "empty API version".to_string(),
        })?;

        Ok(Self {
            base,
            version: version.to_string(),
            http: reqwest::Client::new(),
            auth: None,
        })
    }

    /// Attaches credentials to all subsequent requests.
    pub fn set_auth(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
    }

    /// Credentials attached to every request, if any.
    pub fn auth(&self) -> Option<&BasicAuth> {
        self.auth.as_ref()
    }

    /// API version string this client speaks.
    pub fn client_version(&self) -> &str {
        &self.version
    }

    /// Base address of the control plane.
    pub fn addr(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                addr: self.base.to_string(),
                reason: "address cannot carry a path".to_string(),
            })?;
            path.pop_if_empty();
            path.push(&format!("v{}", self.version));
            path.extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.http.request(method, url);
        match &self.auth {
            Some(auth) => request.basic_auth(&auth.username, Some(&auth.password)),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|source| ApiError::Http {
            addr: self.base.to_string(),
            source,
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|source| ApiError::Http {
            addr: self.base.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &body)?);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        self.execute(self.request(Method::GET, url)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "POST");
        self.execute(self.request(Method::POST, url).json(body))
            .await
    }

    /// Verifies the attached credentials.
    pub async fn login(&self) -> Result<LoginResponse> {
        self.post(&["auth", "login"], &serde_json::json!({})).await
    }

    /// `GET /namespaces/{name}`
    pub async fn namespace(&self, name: &str) -> Result<Namespace> {
        self.get(&["namespaces", name]).await
    }

    /// All namespaces.
    pub async fn namespace_list(&self) -> Result<Vec<Namespace>> {
        self.get(&["namespaces"]).await
    }

    /// Creates a namespace and returns it as stored.
    pub async fn namespace_create(&self, opts: &NamespaceCreateOptions) -> Result<Namespace> {
        self.post(&["namespaces"], opts).await
    }

    /// `GET /nodes/{name}`
    pub async fn node(&self, name: &str) -> Result<Node> {
        self.get(&["nodes", name]).await
    }

    /// All cluster members.
    pub async fn node_list(&self) -> Result<Vec<Node>> {
        self.get(&["nodes"]).await
    }

    /// `GET /pools/{name}`
    pub async fn pool(&self, name: &str) -> Result<Pool> {
        self.get(&["pools", name]).await
    }

    /// All pools.
    pub async fn pool_list(&self) -> Result<Vec<Pool>> {
        self.get(&["pools"]).await
    }

    /// Policies are addressed by id, not by name.
    pub async fn policy(&self, id: &str) -> Result<Policy> {
        self.get(&["policies", id]).await
    }

    /// All policies keyed by id.
    pub async fn policy_list(&self) -> Result<PolicyList> {
        self.get(&["policies"]).await
    }

    /// `GET /namespaces/{namespace}/rules/{name}`
    pub async fn rule(&self, reference: &Reference) -> Result<Rule> {
        self.get(&["namespaces", &reference.namespace, "rules", &reference.name])
            .await
    }

    /// Rules across every namespace.
    pub async fn rule_list(&self) -> Result<Vec<Rule>> {
        self.get(&["rules"]).await
    }

    /// `GET /users/{name}`
    pub async fn user(&self, name: &str) -> Result<User> {
        self.get(&["users", name]).await
    }

    /// All accounts.
    pub async fn user_list(&self) -> Result<Vec<User>> {
        self.get(&["users"]).await
    }

    /// Creates an account.
    pub async fn user_create(&self, opts: &UserCreateOptions) -> Result<User> {
        self.post(&["users"], opts).await
    }

    /// `GET /namespaces/{namespace}/volumes/{name}`
    pub async fn volume(&self, reference: &Reference) -> Result<Volume> {
        self.get(&["namespaces", &reference.namespace, "volumes", &reference.name])
            .await
    }

    /// Volumes across every namespace.
    pub async fn volume_list(&self) -> Result<Vec<Volume>> {
        self.get(&["volumes"]).await
    }

    /// Creates a volume in `opts.namespace`.
    pub async fn volume_create(&self, opts: &VolumeCreateOptions) -> Result<Volume> {
        self.post(&["namespaces", &opts.namespace, "volumes"], opts)
            .await
    }
}

/// Builds the classified error for a non-success response.
///
/// An unrecognised kind tag in the body is itself an error rather than a
/// silent fallback to [`ErrorKind::UnknownError`].
fn remote_error(status: u16, body: &[u8]) -> Result<ApiError> {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_else(|_| ErrorBody {
        message: String::from_utf8_lossy(body).trim().to_string(),
        kind: None,
    });

    let kind = match parsed.kind.as_deref() {
        Some(tag) => tag.parse::<ErrorKind>()?,
        None => ErrorKind::from_status(status),
    };

    Ok(ApiError::Remote {
        status,
        kind,
        message: parsed.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_versioned_rejects_bad_addresses() {
        assert!(Client::new_versioned("", "1").is_err());
        assert!(Client::new_versioned("ftp://host:21", "1").is_err());
        assert!(Client::new_versioned("http://host:5705", "").is_err());
        assert!(Client::new_versioned("http://host:5705", " v ").is_err());
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("1"), Some("1"));
        assert_eq!(normalize_version(" v2 "), Some("2"));
        assert_eq!(normalize_version("v"), None);
        assert_eq!(normalize_version(""), None);
    }

    #[test]
    fn test_endpoint_builds_versioned_path() {
        let client = Client::new_versioned("http://10.0.0.1:5705", "1").unwrap();
        let url = client.endpoint(&["namespaces", "default", "volumes", "vol1"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://10.0.0.1:5705/v1/namespaces/default/volumes/vol1"
        );
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = Client::new_versioned("http://host:5705", "v2").unwrap();
        let url = client.endpoint(&["policies", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://host:5705/v2/policies/a%20b%2Fc");
        assert_eq!(client.client_version(), "2");
    }

    #[test]
    fn test_set_auth() {
        let mut client = Client::new_versioned("https://host:5705", "1").unwrap();
        assert!(client.auth().is_none());
        client.set_auth("admin", "secret");
        assert_eq!(client.auth().unwrap().username, "admin");
    }

    #[test]
    fn test_remote_error_uses_body_kind() {
        let err = remote_error(400, br#"{"message":"taken","kind":"AlreadyExistsError"}"#).unwrap();
        assert_eq!(err.kind(), Some(ErrorKind::AlreadyExistsError));
        assert!(err.to_string().contains("taken"));
    }

    #[test]
    fn test_remote_error_falls_back_to_status() {
        let err = remote_error(404, b"no such volume").unwrap();
        match err {
            ApiError::Remote { kind, message, .. } => {
                assert_eq!(kind, ErrorKind::NotFoundError);
                assert_eq!(message, "no such volume");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_remote_error_unknown_kind_is_hard_failure() {
        let result = remote_error(500, br#"{"message":"x","kind":"BrandNewError"}"#);
        assert!(matches!(result, Err(ApiError::UnknownKind(_))));
    }
}
