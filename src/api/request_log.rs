//! Access logging for incoming search requests.
//!
//! Emits one structured `info` event per request under the
//! `enem_search::request` target. Building the entry never fails the request:
//! any problem is reported at `warn` and swallowed.

use axum::http::{header, HeaderMap, Method, Uri};
use std::net::SocketAddr;

const COUNTRY_HEADERS: [&str; 2] = ["x-vercel-ip-country", "cf-ipcountry"];
const REGION_HEADER: &str = "x-vercel-ip-country-region";
const CITY_HEADER: &str = "x-vercel-ip-city";

/// First hop of `x-forwarded-for`, then `cf-connecting-ip`, `x-real-ip`, and
/// finally the TCP peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = header_str(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    forwarded
        .or_else(|| header_str(headers, "cf-connecting-ip"))
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// Key used by the rate limiter.
pub fn client_identity(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    client_ip(headers, peer).unwrap_or_else(|| "anonymous".to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn decode_geo(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    match urlencoding::decode(raw) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(raw.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLogEntry {
    pub timestamp: String,
    pub method: String,
    pub url: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

impl RequestLogEntry {
    pub fn from_parts(
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        peer: Option<SocketAddr>,
    ) -> Result<Self, String> {
        Ok(Self {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            method: method.to_string(),
            url: full_url(uri, headers)?,
            ip: client_ip(headers, peer),
            user_agent: header_str(headers, header::USER_AGENT.as_str()).map(str::to_string),
            referer: header_str(headers, header::REFERER.as_str()).map(str::to_string),
            country: decode_geo(COUNTRY_HEADERS.iter().find_map(|h| header_str(headers, h))),
            region: decode_geo(header_str(headers, REGION_HEADER)),
            city: decode_geo(header_str(headers, CITY_HEADER)),
        })
    }
}

fn full_url(uri: &Uri, headers: &HeaderMap) -> Result<String, String> {
    if uri.scheme().is_some() {
        return Ok(uri.to_string());
    }

    let host = header_str(headers, header::HOST.as_str()).unwrap_or("localhost");
    let scheme = header_str(headers, "x-forwarded-proto").unwrap_or("http");
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    url::Url::parse(&format!("{}://{}{}", scheme, host, path))
        .map(|url| url.to_string())
        .map_err(|e| format!("cannot rebuild request url: {}", e))
}

pub fn log_request(method: &Method, uri: &Uri, headers: &HeaderMap, peer: Option<SocketAddr>) {
    match RequestLogEntry::from_parts(method, uri, headers, peer) {
        Ok(entry) => tracing::info!(
            target: "enem_search::request",
            timestamp = %entry.timestamp,
            method = %entry.method,
            url = %entry.url,
            ip = entry.ip.as_deref(),
            user_agent = entry.user_agent.as_deref(),
            referer = entry.referer.as_deref(),
            country = entry.country.as_deref(),
            region = entry.region.as_deref(),
            city = entry.city.as_deref(),
            "request"
        ),
        Err(e) => tracing::warn!("Failed to log request: {}", e),
    }
}
