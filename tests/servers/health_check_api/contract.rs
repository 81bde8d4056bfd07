use escrow_health::core::databases::sqlite::Sqlite;
use escrow_health::core::health::sentinel;
use escrow_health::servers::health_check_api::v0::resources::{
    CheckStatus, LivenessReport, LivenessStatus, ReadinessReport, ReadinessStatus, Report, Status,
};
use escrow_health_test_helpers::configuration;

use crate::common::fake_rpc::FakeRpcServer;
use crate::servers::health_check_api::client::{get, get_with_header};
use crate::servers::health_check_api::environment::Environment;

mod the_health_report {
    use super::*;

    #[tokio::test]
    async fn it_should_be_ok_when_every_dependency_is_reachable() {
        let rpc = FakeRpcServer::start(19_531_250).await;

        let mut config = configuration::ephemeral();
        config.blockchain.rpc_url = rpc.url.clone();

        let env = Environment::start(config).await;

        let response = get(&env.url("")).await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
        assert!(response.headers().get("x-request-id").is_some());

        let report = response.json::<Report>().await.unwrap();

        assert_eq!(report.status, Status::Ok);
        assert_eq!(report.environment, "test");
        assert_eq!(
            report.checks.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["auth", "blockchain", "database"]
        );
        assert!(report.checks.values().all(|check| check.status == CheckStatus::Ok));
        assert_eq!(report.checks["blockchain"].chain_id, Some(31337));
        assert!(report.memory.rss > 0);
        assert!(report.total_response_time >= report.checks["database"].response_time);

        env.stop();
        rpc.stop();
    }

    #[tokio::test]
    async fn it_should_be_degraded_when_the_chain_endpoint_is_unreachable() {
        let env = Environment::start(configuration::ephemeral()).await;

        let response = get(&env.url("")).await;

        assert_eq!(response.status(), 503);

        let report = response.json::<Report>().await.unwrap();

        assert_eq!(report.status, Status::Degraded);

        let blockchain = &report.checks["blockchain"];
        assert_eq!(blockchain.status, CheckStatus::Error);
        assert!(blockchain.error.is_some());
        assert_eq!(blockchain.chain_id, None);

        assert_eq!(report.checks["database"].status, CheckStatus::Ok);
        assert_eq!(report.checks["auth"].status, CheckStatus::Ok);

        env.stop();
    }

    #[tokio::test]
    async fn it_should_report_every_failing_dependency() {
        let env = Environment::start(configuration::ephemeral_with_failing_dependencies()).await;

        let response = get(&env.url("")).await;

        assert_eq!(response.status(), 503);

        let report = response.json::<Report>().await.unwrap();

        assert_eq!(report.status, Status::Degraded);
        assert!(report.checks.values().all(|check| check.status == CheckStatus::Error));
        assert_eq!(
            report.checks["auth"].error.as_deref(),
            Some("Firebase project id is not configured")
        );

        env.stop();
    }

    #[tokio::test]
    async fn it_should_create_the_sentinel_record_only_once() {
        let env = Environment::start(configuration::ephemeral()).await;

        let database = Sqlite::new(&env.config.database.path);

        get(&env.url("")).await;
        let first = sentinel::read(&database).await.unwrap().expect("the sentinel record should exist");

        get(&env.url("")).await;
        let second = sentinel::read(&database).await.unwrap().expect("the sentinel record should exist");

        assert_eq!(first["createdAt"], second["createdAt"]);

        env.stop();
    }

    #[tokio::test]
    async fn it_should_be_compressed_when_the_client_accepts_it() {
        let env = Environment::start(configuration::ephemeral()).await;

        let response = get_with_header(&env.url(""), "accept-encoding", "gzip").await;

        assert_eq!(response.headers().get("content-encoding").unwrap(), "gzip");

        env.stop();
    }
}

mod readiness_and_liveness {
    use super::*;

    #[tokio::test]
    async fn readiness_should_be_ok_even_when_every_dependency_is_down() {
        let env = Environment::start(configuration::ephemeral_with_failing_dependencies()).await;

        let response = get(&env.url("/ready")).await;

        assert_eq!(response.status(), 200);

        let report = response.json::<ReadinessReport>().await.unwrap();

        assert_eq!(report.status, ReadinessStatus::Ready);
        assert_eq!(report.pid, std::process::id());

        env.stop();
    }

    #[tokio::test]
    async fn liveness_should_be_ok_even_when_every_dependency_is_down() {
        let env = Environment::start(configuration::ephemeral_with_failing_dependencies()).await;

        let response = get(&env.url("/live")).await;

        assert_eq!(response.status(), 200);

        let report = response.json::<LivenessReport>().await.unwrap();

        assert_eq!(report.status, LivenessStatus::Alive);
        assert!(report.uptime >= 0.0);

        env.stop();
    }
}

mod the_base_path {
    use super::*;

    #[tokio::test]
    async fn it_should_mount_the_endpoints_under_the_configured_path() {
        let mut config = configuration::ephemeral();
        config.health_check_api.base_path = "/status".to_owned();

        let env = Environment::start(config).await;

        assert_eq!(get(&format!("http://{}/status/live", env.addr)).await.status(), 200);
        assert_eq!(get(&format!("http://{}/api/health/live", env.addr)).await.status(), 404);

        env.stop();
    }

    #[tokio::test]
    async fn it_should_mount_the_endpoints_at_the_root_path() {
        let mut config = configuration::ephemeral();
        config.health_check_api.base_path = "/".to_owned();

        let env = Environment::start(config).await;

        assert_eq!(get(&format!("http://{}/ready", env.addr)).await.status(), 200);

        env.stop();
    }
}
