use std::net::SocketAddr;
use std::sync::Arc;

use escrow_health::bootstrap::app::initialize_health_checker;
use escrow_health::bootstrap::jobs::Started;
use escrow_health::servers::health_check_api::server;
use escrow_health::servers::signals::Halted;
use escrow_health_configuration::Configuration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::level_filters::LevelFilter;

use crate::common::logging::{tracing_stderr_init, INIT};

pub struct Environment {
    pub config: Configuration,
    pub addr: SocketAddr,
    pub base_path: String,
    job: JoinHandle<()>,
    tx_halt: oneshot::Sender<Halted>,
}

impl Environment {
    /// Starts the Health Check API with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the health checker can't be built or the server does not
    /// start.
    pub async fn start(config: Configuration) -> Self {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let checker = Arc::new(initialize_health_checker(&config).expect("it should build the health checker"));

        let bind_to = config.health_check_api.bind_address;
        let base_path = config.health_check_api.base_path.clone();

        let (tx_start, rx_start) = oneshot::channel::<Started>();
        let (tx_halt, rx_halt) = oneshot::channel::<Halted>();

        let job = tokio::spawn(async move {
            server::start(bind_to, &base_path, tx_start, rx_halt, checker)
                .await
                .expect("it should serve the Health Check API");
        });

        let started = match rx_start.await {
            Ok(msg) => msg,
            Err(e) => panic!("the Health Check API server was dropped: {e}"),
        };

        Self {
            config,
            addr: started.address,
            base_path: started.base_path,
            job,
            tx_halt,
        }
    }

    /// The URL of an endpoint relative to the base path, for example `/ready`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}{path}", self.addr, self.base_path.trim_end_matches('/'))
    }

    pub fn stop(self) {
        drop(self.tx_halt.send(Halted::Normal));
        self.job.abort();
    }
}
