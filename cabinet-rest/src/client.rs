use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::backend::{HttpBackend, HttpMethod, HttpRequest, HttpResponse, ReqwestBackend};
use crate::config::RestConfig;
use crate::error::{ClientError, ErrorInfo, RestError};
use crate::payload::{Payload, QueryResult};
use crate::query::{encode, QueryBuilder, QueryRequest};

/// Executes queries against a PostgREST endpoint.
///
/// Every call issues exactly one HTTP request and resolves to one
/// [`QueryResult`]. Cloning is cheap and clones share the backend.
#[derive(Clone)]
pub struct RestClient {
    base_url: String,
    api_key: String,
    backend: Arc<dyn HttpBackend>,
}

impl RestClient {
    /// Validate `config` and build a client over a pooled `reqwest` backend.
    pub fn new(config: &RestConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let backend = ReqwestBackend::new(config.timeout())?;
        Self::with_backend(config, backend)
    }

    /// Validate `config` and build a client over a custom backend.
    pub fn with_backend(
        config: &RestConfig,
        backend: impl HttpBackend,
    ) -> Result<Self, ClientError> {
        Self::with_shared_backend(config, Arc::new(backend))
    }

    pub fn with_shared_backend(
        config: &RestConfig,
        backend: Arc<dyn HttpBackend>,
    ) -> Result<Self, ClientError> {
        let base_url = config.validate()?;
        Ok(Self {
            base_url,
            api_key: config.api_key.trim().to_string(),
            backend,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a query on `table`.
    pub fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(table)
    }

    /// Run a read query: one `GET {base}/rest/v1/{table}?…`.
    pub async fn execute(&self, request: &QueryRequest) -> QueryResult {
        let query = request.query_string();
        let url = format!("{}{}{}", self.base_url, request.path(), query);
        debug!(table = request.table(), query = %query, "executing query");

        let http = HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: self.headers(false),
            body: None,
        };
        self.dispatch(request.table(), http).await
    }

    /// Call a stored procedure: one `POST {base}/rest/v1/rpc/{function}`
    /// with `params` as the JSON body.
    pub async fn rpc(&self, function: &str, params: &Value) -> QueryResult {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, encode(function));
        debug!(function, "calling rpc");

        let http = HttpRequest {
            method: HttpMethod::Post,
            url,
            headers: self.headers(true),
            body: Some(params.to_string().into()),
        };
        self.dispatch(function, http).await
    }

    fn headers(&self, with_body: bool) -> Vec<(String, String)> {
        let mut headers = vec![
            ("apikey".to_string(), self.api_key.clone()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.api_key),
            ),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if with_body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        headers
    }

    async fn dispatch(&self, resource: &str, request: HttpRequest) -> QueryResult {
        match self.backend.send(request).await {
            Ok(response) => map_response(resource, response),
            Err(e) => {
                warn!(resource, error = %e, "request failed");
                Err(e.into())
            }
        }
    }
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Map a buffered response to a result.
///
/// Non-2xx statuses become [`RestError::Status`]. A 2xx body that is empty
/// or not JSON becomes [`Payload::Null`].
pub fn map_response(resource: &str, response: HttpResponse) -> QueryResult {
    if !response.is_success() {
        let info = ErrorInfo::from_body(&response.body, &response.status_text());
        warn!(
            resource,
            status = response.status,
            message = %info.message,
            "backend returned an error"
        );
        return Err(RestError::Status {
            status: response.status,
            info,
        });
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::Null);
    }

    match serde_json::from_slice::<Value>(&response.body) {
        Ok(value) => Ok(Payload::from_json(value)),
        Err(e) => {
            warn!(resource, error = %e, "discarding malformed response body");
            Ok(Payload::Null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn map_success_shapes() {
        let rows = map_response("t", HttpResponse::json(200, &json!([{"id": 1}]))).unwrap();
        assert_eq!(rows, Payload::Rows(vec![json!({"id": 1})]));

        let single = map_response("t", HttpResponse::json(200, &json!({"n": 3}))).unwrap();
        assert_eq!(single, Payload::Single(json!({"n": 3})));

        assert!(map_response("t", HttpResponse::new(204, "")).unwrap().is_null());
        assert!(map_response("t", HttpResponse::new(200, "null")).unwrap().is_null());
        assert!(map_response("t", HttpResponse::new(200, "{oops")).unwrap().is_null());
    }

    #[test]
    fn map_error_statuses() {
        let err = map_response(
            "t",
            HttpResponse::json(404, &json!({"message": "not found"})).with_reason("Not Found"),
        )
        .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "not found");

        let err = map_response("t", HttpResponse::new(500, "boom").with_reason("Internal Server Error"))
            .unwrap_err();
        assert_eq!(err.message(), "Internal Server Error");

        let err = map_response("t", HttpResponse::new(418, "")).unwrap_err();
        assert_eq!(err.message(), "HTTP 418");
    }
}
