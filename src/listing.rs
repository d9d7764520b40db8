use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{FetchError, Page, PageQuery};

pub(crate) const AMBASSADORS_SERVICE: &str = "api/v2/ambassadors";
pub(crate) const MERCHANTS_SERVICE: &str = "api/v1/merchants";

pub(crate) const AMBASSADOR_SORT_KEY: &str = "account";
pub(crate) const MERCHANT_SORT_KEY: &str = "name";

// Per-request guard only; the drain loop itself has no deadline.
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Seam to the remote listing endpoint. The loader only ever talks to this,
/// so tests script pages in memory and the transport stays swappable.
pub(crate) trait PageSource<T> {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page<T>, FetchError>;
}

/// Joins a service path onto the endpoint base. `Url::join` would replace
/// the last path segment of a base without a trailing slash, so one is
/// added first.
pub(crate) fn service_url(base: &Url, service: &str) -> Result<Url, url::ParseError> {
    if base.path().ends_with('/') {
        base.join(service)
    } else {
        let mut with_slash = base.clone();
        with_slash.set_path(&format!("{}/", base.path()));
        with_slash.join(service)
    }
}

pub(crate) fn sort_param(sort_key: &str) -> String {
    format!("$sort[{sort_key}]")
}

/// Listing client for one service path of a feathers-style REST endpoint:
/// GET with `$sort[<key>]` / `$limit` / `$skip` query parameters, JSON
/// page envelope back.
pub(crate) struct HttpListingClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpListingClient {
    pub(crate) fn for_service(base: &Url, service: &str) -> Result<Self, FetchError> {
        let endpoint = service_url(base, service)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(HttpListingClient { http, endpoint })
    }

    pub(crate) fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl<T: DeserializeOwned> PageSource<T> for HttpListingClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page<T>, FetchError> {
        let sort = sort_param(&query.sort_key);
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                (sort.as_str(), query.sort_direction.wire_value().to_string()),
                ("$limit", query.limit.to_string()),
                ("$skip", query.skip.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let page = response.json::<Page<T>>().await?;
        Ok(page)
    }
}
