//! Per-strategy URL and field assembly.
//!
//! Each strategy takes the protocol's fixed endpoint, the caller's
//! credential and the instant read for this call, and produces an ordered
//! [`SigningResult`]. Query values are form-urlencoded by [`url::Url`].

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use url::Url;

use super::canonical;
use super::credential::{Credential, redact};
use super::crypto::{hmac_sha1_base64, hmac_sha256_base64, md5_hex};
use super::protocol::{Protocol, RTASR_SERVICE_SELECTOR};
use crate::errors::{SignError, SignResult};

/// Keys a [`SigningResult`] may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultField {
    Url,
    AppId,
    Ts,
    Signa,
    Host,
    Date,
    Authorization,
}

impl ResultField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultField::Url => "url",
            ResultField::AppId => "appId",
            ResultField::Ts => "ts",
            ResultField::Signa => "signa",
            ResultField::Host => "host",
            ResultField::Date => "date",
            ResultField::Authorization => "authorization",
        }
    }
}

impl fmt::Display for ResultField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered field mapping returned by a signing call.
///
/// Keys come from the closed [`ResultField`] set and keep insertion order.
/// Values are never absent once inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningResult {
    fields: Vec<(ResultField, String)>,
}

impl SigningResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing the value in place if the key exists.
    pub fn insert(&mut self, field: ResultField, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == field) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: ResultField) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = ResultField> + '_ {
        self.fields.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResultField, &str)> {
        self.fields.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rebuild the mapping with every value passed through `f`, keeping
    /// keys and order.
    pub fn map_values<F>(self, mut f: F) -> Self
    where
        F: FnMut(ResultField, String) -> String,
    {
        Self {
            fields: self
                .fields
                .into_iter()
                .map(|(key, value)| (key, f(key, value)))
                .collect(),
        }
    }
}

impl Serialize for SigningResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// Signed header-style authorization: the base64 wrapper and its inputs.
struct HeaderAuthorization {
    date: String,
    authorization: String,
}

/// Build the base64 `api_key=..., algorithm=..., headers=..., signature=...`
/// wrapper for a header-style protocol.
fn sign_header_style(
    protocol: Protocol,
    credential: &Credential,
    now: &DateTime<Utc>,
) -> SignResult<HeaderAuthorization> {
    let api_secret = credential.api_secret.as_deref().ok_or_else(|| {
        SignError::ConfigMissing(format!("{}.api_secret", protocol.credential_section()))
    })?;

    let date = canonical::http_date(now);
    let signature_origin =
        canonical::header_style(protocol.host(), &date, protocol.method(), protocol.path());
    tracing::trace!(protocol = %protocol, canonical = ?signature_origin, "Built canonical string");

    let signature = hmac_sha256_base64(&signature_origin, api_secret)?;
    let authorization_origin = format!(
        "api_key=\"{}\", algorithm=\"hmac-sha256\", headers=\"host date request-line\", signature=\"{}\"",
        credential.api_key, signature
    );
    let authorization = BASE64.encode(authorization_origin.as_bytes());

    tracing::debug!(
        protocol = %protocol,
        date = %date,
        signature = %redact(&signature),
        "Signed header-style request"
    );

    Ok(HeaderAuthorization {
        date,
        authorization,
    })
}

fn parse_base_url(protocol: Protocol) -> SignResult<Url> {
    Url::parse(&protocol.base_url())
        .map_err(|e| SignError::CryptoFailure(format!("Invalid base URL for {protocol}: {e}")))
}

/// Streaming-auth strategy (IAT, TTS): websocket URL carrying
/// `authorization`, `date` and `host`. Fields: `url`, `appId`.
pub fn streaming_auth(
    protocol: Protocol,
    credential: &Credential,
    now: &DateTime<Utc>,
) -> SignResult<SigningResult> {
    let signed = sign_header_style(protocol, credential, now)?;

    let mut url = parse_base_url(protocol)?;
    url.query_pairs_mut()
        .append_pair("authorization", &signed.authorization)
        .append_pair("date", &signed.date)
        .append_pair("host", protocol.host());

    let mut result = SigningResult::new();
    result.insert(ResultField::Url, url.as_str());
    result.insert(ResultField::AppId, credential.app_id.as_str());
    Ok(result)
}

/// Elapsed-time strategy (RTASR): `signa = base64(HMAC-SHA1(md5(appId+ts), apiKey))`
/// on a websocket URL carrying `appid`, `ts`, `signa` and the `pd` selector.
/// Fields: `url`, `appId`, `ts`, `signa`.
pub fn elapsed_time(
    protocol: Protocol,
    credential: &Credential,
    now: &DateTime<Utc>,
) -> SignResult<SigningResult> {
    let ts = now.timestamp();
    let ts_string = ts.to_string();

    let base_string = canonical::timestamp_style(&credential.app_id, ts);
    let signa = hmac_sha1_base64(&md5_hex(&base_string), &credential.api_key)?;

    tracing::debug!(
        protocol = %protocol,
        ts = ts,
        signa = %redact(&signa),
        "Signed elapsed-time request"
    );

    let mut url = parse_base_url(protocol)?;
    url.query_pairs_mut()
        .append_pair("appid", &credential.app_id)
        .append_pair("ts", &ts_string)
        .append_pair("signa", &signa)
        .append_pair("pd", RTASR_SERVICE_SELECTOR);

    let mut result = SigningResult::new();
    result.insert(ResultField::Url, url.as_str());
    result.insert(ResultField::AppId, credential.app_id.as_str());
    result.insert(ResultField::Ts, ts_string);
    result.insert(ResultField::Signa, signa);
    Ok(result)
}

/// HTTP-date strategy (DTS create/query): HTTPS URL with the same three
/// query parameters, plus the raw `host`, `date` and `authorization`
/// values for callers that set headers themselves.
/// Fields: `url`, `appId`, `host`, `date`, `authorization`.
pub fn http_date(
    protocol: Protocol,
    credential: &Credential,
    now: &DateTime<Utc>,
) -> SignResult<SigningResult> {
    let signed = sign_header_style(protocol, credential, now)?;

    let mut url = parse_base_url(protocol)?;
    url.query_pairs_mut()
        .append_pair("authorization", &signed.authorization)
        .append_pair("date", &signed.date)
        .append_pair("host", protocol.host());

    let mut result = SigningResult::new();
    result.insert(ResultField::Url, url.as_str());
    result.insert(ResultField::AppId, credential.app_id.as_str());
    result.insert(ResultField::Host, protocol.host());
    result.insert(ResultField::Date, signed.date);
    result.insert(ResultField::Authorization, signed.authorization);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn instant() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn header_credential() -> Credential {
        Credential::new("appid01", "key", Some("secret".to_string()))
    }

    fn query(url: &str) -> HashMap<String, String> {
        Url::parse(url).unwrap().query_pairs().into_owned().collect()
    }

    #[test]
    fn test_signing_result_insert_keeps_order_and_replaces() {
        let mut result = SigningResult::new();
        result.insert(ResultField::Url, "u");
        result.insert(ResultField::AppId, "a");
        result.insert(ResultField::Url, "u2");

        let keys: Vec<_> = result.keys().collect();
        assert_eq!(keys, vec![ResultField::Url, ResultField::AppId]);
        assert_eq!(result.get(ResultField::Url), Some("u2"));
        assert_eq!(result.get(ResultField::Ts), None);
    }

    #[test]
    fn test_signing_result_serializes_in_order() {
        let mut result = SigningResult::new();
        result.insert(ResultField::Url, "wss://x");
        result.insert(ResultField::AppId, "a");
        result.insert(ResultField::Ts, "1");

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"url":"wss://x","appId":"a","ts":"1"}"#);
    }

    #[test]
    fn test_streaming_auth_known_vector() {
        let result = streaming_auth(Protocol::StreamAsr, &header_credential(), &instant()).unwrap();

        let keys: Vec<_> = result.keys().collect();
        assert_eq!(keys, vec![ResultField::Url, ResultField::AppId]);
        assert_eq!(result.get(ResultField::AppId), Some("appid01"));

        let url = result.get(ResultField::Url).unwrap();
        assert!(url.starts_with("wss://iat-api.xfyun.cn/v2/iat?authorization="));

        let params = query(url);
        assert_eq!(params.len(), 3);
        assert_eq!(
            params["authorization"],
            "YXBpX2tleT0ia2V5IiwgYWxnb3JpdGhtPSJobWFjLXNoYTI1NiIsIGhlYWRlcnM9Imhvc3QgZGF0ZSByZXF1ZXN0LWxpbmUiLCBzaWduYXR1cmU9IitMNjZ1dmFLMTRXNWNqVTljcGc0alZHc0ZLQmsxaytiV3JlWmVHaElGZUk9Ig=="
        );
        assert_eq!(params["date"], "Tue, 14 Nov 2023 22:13:20 GMT");
        assert_eq!(params["host"], "iat-api.xfyun.cn");
    }

    #[test]
    fn test_streaming_auth_encodes_reserved_characters() {
        let result = streaming_auth(Protocol::StreamTts, &header_credential(), &instant()).unwrap();
        let url = result.get(ResultField::Url).unwrap();

        assert!(url.contains("date=Tue%2C+14+Nov+2023+22%3A13%3A20+GMT"));
        assert!(url.contains("%3D%3D&date="));
        let raw_query = url.split_once('?').unwrap().1;
        assert!(!raw_query.contains(' '));
        assert_eq!(raw_query.matches('&').count(), 2);
    }

    #[test]
    fn test_streaming_auth_requires_secret() {
        let credential = Credential::new("appid01", "key", None);
        let result = streaming_auth(Protocol::StreamTts, &credential, &instant());
        match result {
            Err(SignError::ConfigMissing(field)) => assert_eq!(field, "tts.api_secret"),
            other => panic!("expected ConfigMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_elapsed_time_known_vector() {
        let credential = Credential::new("1234", "key", None);
        let result = elapsed_time(Protocol::ContinuousAsr, &credential, &instant()).unwrap();

        assert_eq!(result.get(ResultField::Ts), Some("1700000000"));
        assert_eq!(
            result.get(ResultField::Signa),
            Some("1C2g10OqFY+e8O+AhpUciv0BKdU=")
        );

        let url = result.get(ResultField::Url).unwrap();
        assert!(url.starts_with("wss://rtasr.xfyun.cn/v1/ws?appid=1234&ts=1700000000&signa="));
        assert!(url.ends_with("&pd=edu"));

        let params = query(url);
        assert_eq!(params.len(), 4);
        assert_eq!(params["signa"], "1C2g10OqFY+e8O+AhpUciv0BKdU=");
        assert_eq!(params["ts"], result.get(ResultField::Ts).unwrap());
    }

    #[test]
    fn test_elapsed_time_changes_with_ts() {
        let credential = Credential::new("1234", "key", None);
        let later = Utc.timestamp_opt(1_700_000_001, 0).unwrap();
        let result = elapsed_time(Protocol::ContinuousAsr, &credential, &later).unwrap();

        assert_eq!(
            result.get(ResultField::Signa),
            Some("pkS18kerEoiYevQfWMmipKfP3VU=")
        );
    }

    #[test]
    fn test_http_date_fields() {
        let result =
            http_date(Protocol::LongFormCreate, &header_credential(), &instant()).unwrap();

        let keys: Vec<_> = result.keys().collect();
        assert_eq!(
            keys,
            vec![
                ResultField::Url,
                ResultField::AppId,
                ResultField::Host,
                ResultField::Date,
                ResultField::Authorization
            ]
        );
        assert_eq!(result.get(ResultField::Host), Some("api-dx.xf-yun.com"));
        assert_eq!(
            result.get(ResultField::Date),
            Some("Tue, 14 Nov 2023 22:13:20 GMT")
        );

        let url = result.get(ResultField::Url).unwrap();
        assert!(url.starts_with("https://api-dx.xf-yun.com/v1/private/dts_create?"));

        let params = query(url);
        assert_eq!(params.len(), 3);
        assert_eq!(
            params["authorization"],
            result.get(ResultField::Authorization).unwrap()
        );
        assert_eq!(params["date"], result.get(ResultField::Date).unwrap());
    }

    #[test]
    fn test_http_date_signs_post_request_line() {
        let result =
            http_date(Protocol::LongFormQuery, &header_credential(), &instant()).unwrap();
        let authorization = result.get(ResultField::Authorization).unwrap();
        let wrapper = String::from_utf8(BASE64.decode(authorization).unwrap()).unwrap();

        let expected_signature = hmac_sha256_base64(
            "host: api-dx.xf-yun.com\ndate: Tue, 14 Nov 2023 22:13:20 GMT\nPOST /v1/private/dts_query HTTP/1.1",
            "secret",
        )
        .unwrap();
        assert_eq!(
            wrapper,
            format!(
                "api_key=\"key\", algorithm=\"hmac-sha256\", headers=\"host date request-line\", signature=\"{expected_signature}\""
            )
        );
    }
}
