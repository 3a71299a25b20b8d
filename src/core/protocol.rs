//! iFlytek speech WebAPI protocol variants.
//!
//! Each variant carries the fixed host, path and HTTP method the remote
//! platform verifies signatures against, plus the assembly strategy used to
//! build its signed artifact. Hosts, paths and query parameter names are a
//! wire contract with the platform and must not change.
//!
//! # Example
//!
//! ```rust
//! use xfyun_sign::core::{Protocol, Strategy};
//!
//! let protocol = Protocol::StreamAsr;
//! assert_eq!(protocol.host(), "iat-api.xfyun.cn");
//! assert_eq!(protocol.path(), "/v2/iat");
//! assert_eq!(protocol.strategy(), Strategy::StreamingAuth);
//! assert_eq!(protocol.base_url(), "wss://iat-api.xfyun.cn/v2/iat");
//! ```

use std::fmt;

/// Secure-websocket scheme prefix.
pub const WSS_SCHEME: &str = "wss";

/// Plain HTTPS scheme prefix.
pub const HTTPS_SCHEME: &str = "https";

/// Fixed service selector sent with Continuous ASR connections.
pub const RTASR_SERVICE_SELECTOR: &str = "edu";

/// The signing scheme a protocol uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// HMAC-SHA256 over the header-style canonical string, wrapped into a
    /// base64 authorization parameter on a websocket URL.
    StreamingAuth,
    /// HMAC-SHA1 over `md5(appId + ts)`, keyed by the API key.
    ElapsedTime,
    /// Same signature as [`Strategy::StreamingAuth`], delivered as an HTTPS
    /// URL plus explicit `host`, `date` and `authorization` fields.
    HttpDate,
}

/// HTTP method that appears in the signed request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote speech API the caller wants a signed artifact for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Streaming speech recognition (IAT)
    StreamAsr,
    /// Streaming speech synthesis (TTS)
    StreamTts,
    /// Continuous real-time transcription (RTASR)
    ContinuousAsr,
    /// Long-form synthesis, task creation (DTS)
    LongFormCreate,
    /// Long-form synthesis, task query (DTS)
    LongFormQuery,
}

impl Protocol {
    /// All protocols, in route order.
    pub const ALL: [Protocol; 5] = [
        Protocol::StreamAsr,
        Protocol::StreamTts,
        Protocol::ContinuousAsr,
        Protocol::LongFormCreate,
        Protocol::LongFormQuery,
    ];

    /// Short identifier used in logs and routes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::StreamAsr => "iat",
            Protocol::StreamTts => "tts",
            Protocol::ContinuousAsr => "rtasr",
            Protocol::LongFormCreate => "dts_create",
            Protocol::LongFormQuery => "dts_query",
        }
    }

    /// Name of the credential section this protocol reads.
    ///
    /// Both long-form operations share the `dts` credential.
    pub fn credential_section(&self) -> &'static str {
        match self {
            Protocol::StreamAsr => "iat",
            Protocol::StreamTts => "tts",
            Protocol::ContinuousAsr => "rtasr",
            Protocol::LongFormCreate | Protocol::LongFormQuery => "dts",
        }
    }

    pub fn host(&self) -> &'static str {
        match self {
            Protocol::StreamAsr => "iat-api.xfyun.cn",
            Protocol::StreamTts => "tts-api.xfyun.cn",
            Protocol::ContinuousAsr => "rtasr.xfyun.cn",
            Protocol::LongFormCreate | Protocol::LongFormQuery => "api-dx.xf-yun.com",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Protocol::StreamAsr => "/v2/iat",
            Protocol::StreamTts => "/v2/tts",
            Protocol::ContinuousAsr => "/v1/ws",
            Protocol::LongFormCreate => "/v1/private/dts_create",
            Protocol::LongFormQuery => "/v1/private/dts_query",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Protocol::StreamAsr | Protocol::StreamTts | Protocol::ContinuousAsr => Method::Get,
            Protocol::LongFormCreate | Protocol::LongFormQuery => Method::Post,
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Protocol::StreamAsr | Protocol::StreamTts => Strategy::StreamingAuth,
            Protocol::ContinuousAsr => Strategy::ElapsedTime,
            Protocol::LongFormCreate | Protocol::LongFormQuery => Strategy::HttpDate,
        }
    }

    /// URL scheme of the returned artifact.
    pub fn scheme(&self) -> &'static str {
        match self.strategy() {
            Strategy::StreamingAuth | Strategy::ElapsedTime => WSS_SCHEME,
            Strategy::HttpDate => HTTPS_SCHEME,
        }
    }

    /// Whether the protocol signs with the API secret.
    ///
    /// Continuous ASR keys its MAC with the API key and has no secret.
    pub fn requires_api_secret(&self) -> bool {
        self.strategy() != Strategy::ElapsedTime
    }

    /// Scheme, host and path without any query string.
    pub fn base_url(&self) -> String {
        format!("{}://{}{}", self.scheme(), self.host(), self.path())
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
