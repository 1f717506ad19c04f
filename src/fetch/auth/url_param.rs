use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that appends an API key as a URL query parameter.
///
/// Google APIs take their key as `key=<value>`; see [`UrlParam::google`].
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    pub fn google(inner: C, key: String) -> Self {
        Self {
            inner,
            param_name: "key".to_string(),
            key,
        }
    }

    /// Returns `url` with the key appended, as it will be sent.
    pub fn apply(&self, mut url: reqwest::Url) -> reqwest::Url {
        url.query_pairs_mut().append_pair(&self.param_name, &self.key);
        url
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let url = self.apply(req.url().clone());
        *req.url_mut() = url;
        self.inner.execute(req).await
    }
}
