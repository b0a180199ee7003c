//! Classified API client.
//!
//! [`ApiClient`] pairs an [`HttpClient`] and a base URL with a
//! [`ResponseClassifier`], so every call resolves to the response or a typed
//! [`ApiError`].

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{
    ApiError, ApiResult, Classification, ErrorTranslator, HttpClient, Method, Request, Response,
    ResponseClassifier, ServiceErrorTranslator,
};

/// API client with typed error classification.
///
/// Responses with a 4xx or 5xx status go through the classifier. Those it
/// classifies as [`Classification::NoError`] (an unrecognized status with an
/// empty body) are returned like any other response.
///
/// # Example
///
/// ```ignore
/// use murmur::{ApiClient, ApiError, HyperClient};
///
/// let api = ApiClient::new(HyperClient::new(), "https://api.example.com/api/v1/")?;
///
/// match api.get_json::<Vec<Message>>("messages.json").await {
///     Ok(messages) => println!("{} messages", messages.len()),
///     Err(ApiError::RateLimitExceeded) => back_off().await,
///     Err(err) => return Err(err.into()),
/// }
/// ```
#[derive(Debug)]
pub struct ApiClient<C, T = ServiceErrorTranslator> {
    client: C,
    base_url: Url,
    classifier: ResponseClassifier<T>,
}

impl<C: Clone, T> Clone for ApiClient<C, T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

impl<C> ApiClient<C> {
    /// Create a client for the given base URL.
    ///
    /// A trailing `/` is added to the base path when missing, so that relative
    /// paths resolve below it.
    pub fn new(client: C, base_url: impl AsRef<str>) -> ApiResult<Self> {
        let base_url = Url::parse(base_url.as_ref()).map_err(crate::Error::InvalidUrl)?;
        Ok(Self::with_url(client, base_url))
    }

    /// Create a client with a pre-parsed base URL.
    #[must_use]
    pub fn with_url(client: C, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            client,
            base_url,
            classifier: ResponseClassifier::new(),
        }
    }
}

impl<C, T> ApiClient<C, T> {
    /// Replace the error translator.
    #[must_use]
    pub fn with_translator<U: ErrorTranslator>(self, translator: U) -> ApiClient<C, U> {
        ApiClient {
            client: self.client,
            base_url: self.base_url,
            classifier: ResponseClassifier::with_translator(translator),
        }
    }

    /// Base URL all paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The classifier applied to error responses.
    #[must_use]
    pub fn classifier(&self) -> &ResponseClassifier<T> {
        &self.classifier
    }

    /// The underlying transport.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Resolve a path against the base URL.
    pub fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::from(crate::Error::InvalidUrl(err)))
    }
}

impl<C, T> ApiClient<C, T>
where
    C: HttpClient,
    T: ErrorTranslator,
{
    /// Execute a request and classify the response.
    pub async fn send(&self, request: Request<Bytes>) -> ApiResult<Response<Bytes>> {
        let response = self.client.execute(request).await?;
        if !response.is_error() {
            return Ok(response);
        }

        match self.classifier.classify(response.clone()).await {
            Classification::NoError => {
                debug!(status = response.status(), "error status without body, passing through");
                Ok(response)
            }
            Classification::Failed(err) => Err(err),
        }
    }

    /// GET a path.
    pub async fn get(&self, path: &str) -> ApiResult<Response<Bytes>> {
        let url = self.url(path)?;
        self.send(Request::builder(Method::Get, url).build()).await
    }

    /// GET a path and decode the JSON body.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let response = self.get(path).await?;
        response.json().map_err(ApiError::from)
    }

    /// POST a JSON body to a path.
    pub async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Response<Bytes>> {
        let url = self.url(path)?;
        let request = Request::builder(Method::Post, url).json(body)?.build();
        self.send(request).await
    }

    /// DELETE a path.
    pub async fn delete(&self, path: &str) -> ApiResult<Response<Bytes>> {
        let url = self.url(path)?;
        self.send(Request::builder(Method::Delete, url).build()).await
    }
}

#[cfg(feature = "streaming")]
impl<T: ErrorTranslator> ApiClient<crate::HyperClient, T> {
    /// Execute a request without buffering the body, classifying error
    /// responses straight from the stream.
    pub async fn send_streaming(
        &self,
        request: Request<Bytes>,
    ) -> ApiResult<crate::StreamingResponse> {
        let response = self.client.execute_streaming(request).await?;
        if !crate::has_error(response.status()) {
            return Ok(response);
        }

        let status = response.status();
        let headers = response.headers().clone();
        match self.classifier.classify(response).await {
            // The body was consumed and is empty
            Classification::NoError => Ok(crate::StreamingResponse::new(
                status,
                headers,
                Box::pin(futures_util::stream::empty::<crate::Result<Bytes>>()),
            )),
            Classification::Failed(err) => Err(err),
        }
    }
}
