use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;

use super::responses;
use crate::core::health::checker::HealthChecker;
use crate::core::health::{liveness, readiness};
use crate::servers::health_check_api::HEALTH_CHECK_API_LOG_TARGET;

/// Endpoint for the full health report.
///
/// It probes every dependency. A failing probe degrades the report but does
/// not fail the request: only a report that can not be built is answered
/// with the bare error body.
pub(crate) async fn health_handler(State(checker): State<Arc<HealthChecker>>) -> Response {
    match checker.get_health().await {
        Ok(report) => responses::report(report.into()),
        Err(err) => {
            tracing::error!(target: HEALTH_CHECK_API_LOG_TARGET, %err, "unable to build the health report");

            responses::error(err.to_string())
        }
    }
}

/// Endpoint for the readiness probe of the orchestrator.
pub(crate) async fn readiness_handler() -> Response {
    responses::ready(readiness().into())
}

/// Endpoint for the liveness probe of the orchestrator.
pub(crate) async fn liveness_handler() -> Response {
    responses::alive(liveness().into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use escrow_health_configuration::{Configuration, DatabaseDriver};
    use serde_json::Value;

    use super::health_handler;
    use crate::core::auth::{self, MockAuthService};
    use crate::core::blockchain::MockChainClient;
    use crate::core::databases::MockDatabase;
    use crate::core::health::checker::HealthChecker;
    use crate::core::health::memory::MockMemorySampler;
    use crate::core::health::Error;

    fn checker_without_memory_figures() -> HealthChecker {
        let mut database = MockDatabase::new();
        database.expect_driver().return_const(DatabaseDriver::Sqlite3);
        database.expect_create_document_if_absent().returning(|_, _| Ok(false));
        database.expect_get_document().returning(|_| Ok(None));

        let mut auth = MockAuthService::new();
        auth.expect_client().returning(|| Err(auth::Error::MissingProjectId));

        let mut chain = MockChainClient::new();
        chain.expect_block_number().returning(|| Ok(1));

        let mut memory = MockMemorySampler::new();
        memory.expect_sample().returning(|| {
            Err(Error::ProcessInfo {
                message: "process 42 not found".to_owned(),
            })
        });

        HealthChecker::new(&Configuration::default(), Arc::new(database), Arc::new(auth), Arc::new(chain))
            .with_memory_sampler(Arc::new(memory))
    }

    #[tokio::test]
    async fn it_should_answer_with_the_error_body_when_the_report_can_not_be_built() {
        let response = health_handler(State(Arc::new(checker_without_memory_figures()))).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "ERROR");
        assert_eq!(json["error"], "Unable to inspect the current process: process 42 not found");
        assert!(json["timestamp"].is_string());
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
