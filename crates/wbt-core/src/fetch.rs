//! Buffered HTTP GET via curl (libcurl).
//!
//! Both the CDX index lookup and the snapshot download go through [`get`],
//! which buffers the whole response body and captures the Content-Type.
//! Errors stay typed so callers can classify connection-establishment
//! failures (needed for the HTTPS→HTTP index fallback).

use std::time::Duration;
use thiserror::Error;

/// A fully buffered response body plus the declared content type.
#[derive(Debug)]
pub struct FetchedBody {
    pub bytes: Vec<u8>,
    /// `Content-Type` header value as reported by libcurl, if any.
    pub content_type: Option<String>,
}

/// Error from a single GET (curl failure or non-2xx status).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Curl(#[from] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
}

impl FetchError {
    /// True if the failure was connection-level (DNS, refused, proxy, TLS
    /// handshake, reset) rather than an HTTP error response or a timeout on
    /// an established connection.
    pub fn is_connection_error(&self) -> bool {
        match self {
            FetchError::Curl(e) => {
                e.is_couldnt_connect()
                    || e.is_couldnt_resolve_host()
                    || e.is_couldnt_resolve_proxy()
                    || e.is_ssl_connect_error()
                    || e.is_recv_error()
                    || e.is_send_error()
                    || e.is_got_nothing()
            }
            FetchError::Http(_) => false,
        }
    }
}

/// Performs a GET and returns the buffered body.
///
/// Follows redirects (replay URLs redirect to the canonical capture
/// timestamp). `timeout` bounds the whole transfer so a stalled request
/// fails fast instead of hanging.
pub fn get(url: &str, timeout: Duration, user_agent: Option<&str>) -> Result<FetchedBody, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;
    if let Some(ua) = user_agent {
        easy.useragent(ua)?;
    }

    let mut bytes = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            bytes.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    let content_type = easy.content_type()?.map(str::to_owned);
    Ok(FetchedBody { bytes, content_type })
}
