//! Conversions between this crate's messages and [`http`] types.

use http::StatusCode;
use http::header::{HeaderName, HeaderValue};

use crate::error::ConversionError;
use crate::headers::Headers;
use crate::types::{HttpRequest, HttpResponse};

impl TryFrom<http::Request<String>> for HttpRequest {
    type Error = ConversionError;

    /// The URI's path and query become `resource`; header names are the
    /// lowercase names [`http`] stores.
    fn try_from(request: http::Request<String>) -> Result<Self, Self::Error> {
        let (parts, body) = request.into_parts();
        let resource = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_owned(), |pq| pq.as_str().to_owned());

        let mut headers = Headers::new();
        for (name, value) in &parts.headers {
            let value = std::str::from_utf8(value.as_bytes()).map_err(|_| {
                ConversionError::NonUtf8Header {
                    name: name.as_str().to_owned(),
                }
            })?;
            headers.append(name.as_str(), value);
        }

        Ok(Self {
            method: parts.method.as_str().to_owned(),
            resource,
            headers,
            body,
            username: None,
            password: None,
        })
    }
}

impl TryFrom<HttpResponse> for http::Response<String> {
    type Error = ConversionError;

    fn try_from(response: HttpResponse) -> Result<Self, Self::Error> {
        let status = StatusCode::from_u16(response.status_code)?;
        let mut out = Self::new(response.body);
        *out.status_mut() = status;

        let map = out.headers_mut();
        for (name, value) in response.headers {
            map.append(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(&value)?,
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_http() {
        let request = http::Request::builder()
            .method("POST")
            .uri("https://example.com/books?isbn=1")
            .header("Content-Type", "application/json")
            .header("X-Tag", "a")
            .header("X-Tag", "b")
            .body(r#"{"title":"x"}"#.to_owned())
            .unwrap();

        let converted = HttpRequest::try_from(request).unwrap();
        assert_eq!(converted.method, "POST");
        assert_eq!(converted.resource, "/books?isbn=1");
        assert_eq!(converted.headers.get("content-type"), Some("application/json"));
        assert_eq!(converted.headers.get_all("x-tag").collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(converted.body, r#"{"title":"x"}"#);
    }

    #[test]
    fn test_request_with_non_utf8_header_fails() {
        let mut request = http::Request::new(String::new());
        request
            .headers_mut()
            .insert("x-raw", HeaderValue::from_bytes(&[0xff]).unwrap());

        let err = HttpRequest::try_from(request).unwrap_err();
        assert!(matches!(err, ConversionError::NonUtf8Header { name } if name == "x-raw"));
    }

    #[test]
    fn test_response_into_http() {
        let response = HttpResponse::new(404)
            .with_header("Content-Type", "text/plain")
            .with_header("Set-Cookie", "a=1")
            .with_header("Set-Cookie", "b=2")
            .with_body("Not Found");

        let converted = http::Response::<String>::try_from(response).unwrap();
        assert_eq!(converted.status(), StatusCode::NOT_FOUND);
        assert_eq!(converted.headers().get_all("set-cookie").iter().count(), 2);
        assert_eq!(converted.body(), "Not Found");
    }

    #[test]
    fn test_response_with_invalid_status_fails() {
        let err = http::Response::<String>::try_from(HttpResponse::new(1000)).unwrap_err();
        assert!(matches!(err, ConversionError::Status(_)));
    }

    #[test]
    fn test_response_with_invalid_header_name_fails() {
        let response = HttpResponse::new(200).with_header("bad header", "x");
        let err = http::Response::<String>::try_from(response).unwrap_err();
        assert!(matches!(err, ConversionError::HeaderName(_)));
    }
}
