// src/middleware/response.rs
use crate::error::PingError;
use crate::report::Report;
use chrono::Utc;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Response, StatusCode};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Serialize a report with the status code its status maps to.
pub fn render(report: &Report) -> Result<Response<Body>, PingError> {
    let body = serde_json::to_vec(report)?;
    Ok(json_response(report.http_status(), body))
}

/// Pre-shaped document for when the checks could not be run or rendered at
/// all. Built by hand so it cannot fail.
pub fn fallback_response() -> Response<Body> {
    let now = Utc::now().timestamp();
    let body = format!(r#"{{"status":"failures","now":"{}"}}"#, now);
    json_response(StatusCode::INTERNAL_SERVER_ERROR, body)
}

fn json_response(status: StatusCode, body: impl Into<Body>) -> Response<Body> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Status;

    #[tokio::test]
    async fn test_fallback_shape() {
        let response = fallback_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "failures");
        assert!(json["now"].as_str().unwrap().parse::<i64>().is_ok());
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_render_status_codes() {
        let ok = Report::new(Utc::now(), Status::Ok);
        assert_eq!(render(&ok).unwrap().status(), StatusCode::OK);

        let failing = Report::new(Utc::now(), Status::Failures);
        let response = render(&failing).unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
    }
}
