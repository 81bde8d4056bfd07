//! API responses: status code plus JSON body.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::resources::{ErrorReport, LivenessReport, ReadinessReport, Report, Status};

/// `200` when every probe passed, `503` otherwise.
#[must_use]
pub fn status_code(status: Status) -> StatusCode {
    match status {
        Status::Ok => StatusCode::OK,
        Status::Degraded | Status::Error => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[must_use]
pub fn report(report: Report) -> Response {
    (status_code(report.status), Json(report)).into_response()
}

#[must_use]
pub fn error(message: String) -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorReport::new(message))).into_response()
}

#[must_use]
pub fn ready(report: ReadinessReport) -> Response {
    (StatusCode::OK, Json(report)).into_response()
}

#[must_use]
pub fn alive(report: LivenessReport) -> Response {
    (StatusCode::OK, Json(report)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::{error, status_code};
    use crate::servers::health_check_api::v0::resources::Status;

    #[test]
    fn only_an_ok_report_should_be_served_with_200() {
        assert_eq!(status_code(Status::Ok), StatusCode::OK);
        assert_eq!(status_code(Status::Degraded), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_code(Status::Error), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn an_error_report_should_be_served_with_503() {
        let response = error("process not found".to_owned());

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()["content-type"], "application/json");
    }
}
