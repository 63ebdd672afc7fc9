//! Blocking request execution behind a trait, so converters can be tested
//! without a network.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::Error;
use crate::types::{HttpRequest, HttpResponse};

/// Something that can carry out a GET request.
///
/// A non-2xx status is not an error at this level; callers inspect
/// `HttpResponse::is_success`.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

impl<T: HttpExecutor + ?Sized> HttpExecutor for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        self.as_ref().execute(request)
    }
}

impl<T: HttpExecutor + ?Sized> HttpExecutor for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        self.as_ref().execute(request)
    }
}

/// Executor backed by a blocking reqwest client.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// A request that does not complete within `timeout` fails with
    /// `Error::Http`, for which `Error::is_timeout` holds.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_default_timeout() -> Result<Self, Error> {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, Error> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.insert(
            HeaderName::try_from(name.as_str())?,
            HeaderValue::try_from(value.as_str())?,
        );
    }
    Ok(map)
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let url = Url::parse(&request.url)?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .headers(header_map(&request.headers)?)
            .send()?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            headers,
            body_text: response.text()?,
        })
    }
}

/// Canned responses for tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        responses: HashMap<String, HttpResponse>,
        fallback: Option<HttpResponse>,
        failure: Option<String>,
        requests: Vec<HttpRequest>,
    }

    /// Answers requests by URL and records every request it receives.
    ///
    /// Clones share state, so a test can hand one clone to a converter and
    /// inspect the requests through another. Unknown URLs get a 404 unless
    /// a default response is set.
    #[derive(Clone, Default)]
    pub struct MockExecutor {
        state: Arc<Mutex<State>>,
    }

    impl MockExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, response: HttpResponse) -> Self {
            self.state
                .lock()
                .unwrap()
                .responses
                .insert(url.into(), response);
            self
        }

        pub fn with_default_response(self, response: HttpResponse) -> Self {
            self.state.lock().unwrap().fallback = Some(response);
            self
        }

        /// Fail every request with `Error::Transport`.
        pub fn fail_with(self, message: impl Into<String>) -> Self {
            self.state.lock().unwrap().failure = Some(message.into());
            self
        }

        pub fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.state.lock().unwrap().requests.clone()
        }

        pub fn success_response(body_text: impl Into<String>) -> HttpResponse {
            HttpResponse {
                status: 200,
                status_text: "OK".to_string(),
                headers: HashMap::new(),
                body_text: body_text.into(),
            }
        }

        pub fn error_response(status: u16, status_text: &str) -> HttpResponse {
            HttpResponse {
                status,
                status_text: status_text.to_string(),
                headers: HashMap::new(),
                body_text: status_text.to_string(),
            }
        }

        pub fn not_found() -> HttpResponse {
            Self::error_response(404, "Not Found")
        }
    }

    impl HttpExecutor for MockExecutor {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request.clone());

            if let Some(message) = &state.failure {
                return Err(Error::Transport {
                    message: message.clone(),
                });
            }
            Ok(state
                .responses
                .get(&request.url)
                .or(state.fallback.as_ref())
                .cloned()
                .unwrap_or_else(Self::not_found))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockExecutor;
    use super::*;

    #[test]
    fn mock_answers_by_url() {
        let executor = MockExecutor::new().with_response(
            "http://fedora/objects/a",
            MockExecutor::success_response("<place/>"),
        );

        let found = executor
            .execute(&HttpRequest::get("http://fedora/objects/a"))
            .unwrap();
        assert_eq!(found.status, 200);
        assert_eq!(found.body_text, "<place/>");

        let missing = executor
            .execute(&HttpRequest::get("http://fedora/objects/b"))
            .unwrap();
        assert_eq!(missing.status, 404);
        assert!(!missing.is_success());
    }

    #[test]
    fn mock_falls_back_to_default_response() {
        let executor =
            MockExecutor::new().with_default_response(MockExecutor::success_response("default"));

        let result = executor.execute(&HttpRequest::get("/any-path")).unwrap();
        assert_eq!(result.body_text, "default");
    }

    #[test]
    fn mock_failure_is_a_transport_error() {
        let executor = MockExecutor::new().fail_with("connection refused");

        match executor.execute(&HttpRequest::get("/x")) {
            Err(Error::Transport { message }) => assert_eq!(message, "connection refused"),
            other => panic!("expected transport error, got {:?}", other),
        }
        assert_eq!(executor.recorded_requests().len(), 1);
    }

    #[test]
    fn clones_share_recorded_requests() {
        let mock = MockExecutor::new();
        let boxed: Box<dyn HttpExecutor> = Box::new(mock.clone());

        boxed.execute(&HttpRequest::get("/first")).unwrap();
        boxed
            .execute(&HttpRequest::get("/second").with_header("Accept", "text/xml"))
            .unwrap();

        let recorded = mock.recorded_requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].url, "/first");
        assert_eq!(recorded[1].url, "/second");
        assert_eq!(
            recorded[1].headers.get("Accept").map(String::as_str),
            Some("text/xml")
        );
    }

    #[test]
    fn reqwest_executor_rejects_relative_url() {
        let executor = ReqwestExecutor::with_default_timeout().unwrap();
        let result = executor.execute(&HttpRequest::get("someFedoraURLobjects/x"));
        assert!(matches!(result, Err(Error::UrlParse(_))));
    }

    #[test]
    fn invalid_header_is_rejected_before_sending() {
        let executor = ReqwestExecutor::new(Duration::from_secs(1)).unwrap();
        let request = HttpRequest::get("http://localhost:1/").with_header("bad header", "x");
        assert!(matches!(
            executor.execute(&request),
            Err(Error::InvalidHeaderName(_))
        ));
    }
}
