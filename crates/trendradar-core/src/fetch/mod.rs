//! Single-shot HTTP GET for one platform's trending list.
//!
//! Uses the curl crate (libcurl) with an optional proxy and a hard timeout.
//! The body's `status` field decides whether the response carries usable
//! data (`success` / `cache`) or is a benign non-match, regardless of the
//! HTTP code. Decoding the items is left to the parser.

mod classify;
mod error;

pub use classify::{check_http_status, classify_curl_error};
pub use error::{ErrorKind, FetchError};

use std::time::{Duration, Instant};

use crate::config::DEFAULT_API_URL;

/// Responses slower than this are logged as slow.
const SLOW_FETCH: Duration = Duration::from_millis(500);

const DEFAULT_HEADERS: [(&str, &str); 4] = [
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    ("Accept", "application/json, text/plain, */*"),
    ("Accept-Language", "zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
    ("Connection", "keep-alive"),
];

/// Request settings shared by every platform in a batch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Base endpoint; the platform id is appended as `?id=`.
    pub api_url: String,
    /// Proxy for all traffic of the request (None = direct / libcurl env defaults).
    pub proxy: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            proxy: None,
            timeout: Duration::from_secs(15),
        }
    }
}

/// Which accepted status the API reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// `"success"`: freshly crawled list.
    Fresh,
    /// `"cache"`: list served from the API's cache.
    Cached,
}

impl ResponseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseStatus::Fresh => "success",
            ResponseStatus::Cached => "cache",
        }
    }
}

/// Outcome of a request that did not fail.
#[derive(Debug, Clone)]
pub enum FetchResponse {
    /// Body to hand to the parser. `status` is None when the body is not JSON
    /// (the parser reports the decode error).
    Data {
        body: String,
        status: Option<ResponseStatus>,
        elapsed: Duration,
    },
    /// JSON body without an accepted `status`; not a failure.
    NonMatch { status: Option<String> },
}

/// Builds `{api_url}?id={id}` with the id query-encoded.
pub fn build_url(api_url: &str, id: &str) -> Result<String, FetchError> {
    let url = url::Url::parse_with_params(api_url, &[("id", id)])?;
    Ok(url.into())
}

enum StatusProbe {
    Accepted(ResponseStatus),
    Rejected(Option<String>),
    NotJson,
}

fn probe_status(body: &str) -> StatusProbe {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return StatusProbe::NotJson;
    };
    match value.get("status") {
        Some(serde_json::Value::String(s)) if s == "success" => {
            StatusProbe::Accepted(ResponseStatus::Fresh)
        }
        Some(serde_json::Value::String(s)) if s == "cache" => {
            StatusProbe::Accepted(ResponseStatus::Cached)
        }
        Some(other) => StatusProbe::Rejected(Some(match other.as_str() {
            Some(s) => s.to_string(),
            None => other.to_string(),
        })),
        None => StatusProbe::Rejected(None),
    }
}

/// Classifies a received body by its `status` field.
pub fn classify_body(body: String, elapsed: Duration) -> FetchResponse {
    match probe_status(&body) {
        StatusProbe::Accepted(status) => FetchResponse::Data {
            body,
            status: Some(status),
            elapsed,
        },
        StatusProbe::Rejected(status) => FetchResponse::NonMatch { status },
        StatusProbe::NotJson => FetchResponse::Data {
            body,
            status: None,
            elapsed,
        },
    }
}

/// Classifies a finished request. A JSON body is judged by its `status`
/// whatever the HTTP code; a non-JSON body on a non-2xx code is an error.
pub fn classify_response(
    code: u32,
    body: String,
    elapsed: Duration,
) -> Result<FetchResponse, FetchError> {
    let response = classify_body(body, elapsed);
    if let FetchResponse::Data { status: None, .. } = response {
        check_http_status(code)?;
    }
    Ok(response)
}

/// Performs exactly one GET for `id`.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn fetch_platform(id: &str, opts: &FetchOptions) -> Result<FetchResponse, FetchError> {
    let url = build_url(&opts.api_url, id)?;
    let curl_err = |e: curl::Error| classify_curl_error(e, opts.timeout);

    let mut easy = curl::easy::Easy::new();
    easy.url(&url).map_err(curl_err)?;
    easy.get(true).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.max_redirections(10).map_err(curl_err)?;
    easy.timeout(opts.timeout).map_err(curl_err)?;
    if let Some(proxy) = opts.proxy.as_deref() {
        easy.proxy(proxy).map_err(curl_err)?;
    }

    let mut list = curl::easy::List::new();
    for (k, v) in DEFAULT_HEADERS {
        list.append(&format!("{}: {}", k, v)).map_err(curl_err)?;
    }
    easy.http_headers(list).map_err(curl_err)?;

    let mut body: Vec<u8> = Vec::new();
    let start = Instant::now();
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }
    let elapsed = start.elapsed();

    let code = easy.response_code().map_err(curl_err)?;

    let body = match String::from_utf8(body) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };

    let response = classify_response(code, body, elapsed)?;
    match &response {
        FetchResponse::Data {
            status: Some(status),
            elapsed,
            ..
        } => log_fetch_time(id, *status, *elapsed),
        FetchResponse::Data { status: None, .. } => {
            tracing::debug!(platform = id, "response body is not JSON");
        }
        FetchResponse::NonMatch { status } => {
            tracing::debug!(platform = id, status = ?status, "response status not accepted");
        }
    }
    Ok(response)
}

fn log_fetch_time(id: &str, status: ResponseStatus, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    if elapsed >= SLOW_FETCH {
        tracing::info!(
            platform = id,
            status = status.as_str(),
            "slow fetch: {:.2}s",
            secs
        );
    } else {
        tracing::info!(
            platform = id,
            status = status.as_str(),
            "fast fetch: {:.2}s",
            secs
        );
    }
}
