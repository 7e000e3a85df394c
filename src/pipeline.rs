use crate::config::ClientOptions;
use crate::credential::TokenCredential;
use crate::errors::{parse_error_response, SchemaRegistryError};
use crate::schema::RawResponse;
use crate::transport::{DynTransport, Method, TransportRequest};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Request pipeline shared by all operations of a client.
///
/// Builds the URL, attaches authorization and identification headers, sends
/// through the transport and turns non-success statuses into service errors.
#[derive(Clone)]
pub(crate) struct Pipeline {
    base_url: String,
    api_version: String,
    scope: String,
    user_agent: String,
    headers: Vec<(String, String)>,
    credential: Arc<dyn TokenCredential>,
    transport: DynTransport,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

/// A single REST call relative to the endpoint.
pub(crate) struct Call<'a> {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(&'static str, &'a str)>,
    pub body: Option<&'a str>,
}

impl Pipeline {
    pub fn new(
        endpoint: &str,
        credential: Arc<dyn TokenCredential>,
        transport: DynTransport,
        options: &ClientOptions,
    ) -> Self {
        let mut headers: Vec<(String, String)> = options
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        headers.sort();

        Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
            api_version: options.api_version.clone(),
            scope: options.scope.clone(),
            user_agent: options.resolved_user_agent(),
            headers,
            credential,
            transport,
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}?api-version={}",
            self.base_url,
            path,
            urlencoding::encode(&self.api_version)
        )
    }

    pub async fn send(&self, call: Call<'_>) -> crate::Result<RawResponse> {
        let token = self.credential.get_token(&[self.scope.as_str()]).await?;

        let mut headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", token.token)),
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
        ];
        if call.body.is_some() {
            headers.push(("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()));
        }
        for (key, value) in &call.headers {
            headers.push(((*key).to_string(), (*value).to_string()));
        }
        headers.extend(self.headers.iter().cloned());

        let request = TransportRequest {
            method: call.method,
            url: self.url(&call.path),
            headers,
            body: call.body.map(str::to_string),
        };

        tracing::debug!(
            http.method = %call.method,
            http.path = %call.path,
            "sending schema registry request"
        );
        let start = Instant::now();
        let response = self.transport.send(request).await?;
        let duration_ms = start.elapsed().as_millis();

        if !response.is_success() {
            let mut err = parse_error_response(&response.body, response.status);
            if let Some(id) = response
                .headers
                .get("x-ms-request-id")
                .or_else(|| response.headers.get("x-request-id"))
            {
                err = err.request_id(id.clone());
            }
            tracing::warn!(
                http.method = %call.method,
                http.path = %call.path,
                http.status = response.status,
                duration_ms = duration_ms,
                error = %err,
                "schema registry request failed"
            );
            return Err(err.into());
        }

        tracing::debug!(
            http.method = %call.method,
            http.path = %call.path,
            http.status = response.status,
            duration_ms = duration_ms,
            "schema registry request completed"
        );

        let body = String::from_utf8(response.body).map_err(|e| {
            SchemaRegistryError::Serialization(format!("response body is not UTF-8: {}", e))
        })?;

        Ok(RawResponse {
            status: response.status,
            headers: response.headers,
            body,
        })
    }
}
