//! Map curl errors onto `FetchError`.

use std::time::Duration;

use super::error::FetchError;

/// Timeouts become `FetchError::Timeout`; everything else is a transport failure.
pub fn classify_curl_error(e: curl::Error, timeout: Duration) -> FetchError {
    if e.is_operation_timedout() {
        return FetchError::Timeout(timeout);
    }
    FetchError::Transport(e)
}

/// Non-2xx is a failure. Only applied to bodies that are not JSON.
pub fn check_http_status(code: u32) -> Result<(), FetchError> {
    if (200..300).contains(&code) {
        Ok(())
    } else {
        Err(FetchError::Http(code))
    }
}
