//! Transport seam.
//!
//! [`HttpClient`] executes requests; the classifier only ever sees what it
//! returns. Implement it for a mock to test resource clients without a network.

use std::future::Future;

use bytes::Bytes;
use url::Url;

use crate::{Method, Request, Response, Result};

/// Core HTTP client trait.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

/// The generic verbs used by resource clients.
pub trait HttpClientExt: HttpClient {
    /// Execute a GET request.
    fn get(&self, url: Url) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        self.execute(Request::builder(Method::Get, url).build())
    }

    /// Execute a POST request with a JSON body.
    fn post_json<T: serde::Serialize + Send + Sync>(
        &self,
        url: Url,
        body: &T,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        async move {
            let request = Request::builder(Method::Post, url).json(body)?.build();
            self.execute(request).await
        }
    }

    /// Execute a DELETE request.
    fn delete(&self, url: Url) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        self.execute(Request::builder(Method::Delete, url).build())
    }
}

impl<T: HttpClient> HttpClientExt for T {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Records requests and answers 204.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(Method, String, Option<Bytes>)>>,
    }

    impl HttpClient for Recorder {
        async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
            let (method, url, _, body) = request.into_parts();
            self.seen
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push((method, url.to_string(), body));
            Ok(Response::new(204, HashMap::new(), Bytes::new()))
        }
    }

    fn url(path: &str) -> Url {
        Url::parse("https://api.example.com/api/v1/")
            .and_then(|base| base.join(path))
            .expect("valid url")
    }

    #[tokio::test]
    async fn verbs_build_requests() {
        let client = Recorder::default();

        client.get(url("users/current.json")).await.expect("get");
        client
            .post_json(url("messages.json"), &serde_json::json!({"body": "hi"}))
            .await
            .expect("post");
        client.delete(url("messages/42")).await.expect("delete");

        let seen = client.seen.into_inner().expect("not poisoned");
        assert_eq!(seen.len(), 3);
        assert_eq!(seen.first().map(|(m, ..)| *m), Some(Method::Get));
        assert_eq!(
            seen.get(1).and_then(|(_, _, body)| body.clone()),
            Some(Bytes::from(r#"{"body":"hi"}"#))
        );
        assert_eq!(
            seen.get(2).map(|(m, url, _)| (*m, url.as_str())),
            Some((Method::Delete, "https://api.example.com/api/v1/messages/42"))
        );
    }
}
