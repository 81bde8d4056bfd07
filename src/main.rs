use escrow_health::servers::signals;
use escrow_health::{app, bootstrap};

#[tokio::main]
async fn main() {
    let (config, checker) = bootstrap::app::setup();

    let jobs = app::start(&config, checker).await;

    // The jobs stop on the same signals, so this returns once they are done.
    app::wait_for_shutdown(signals::global_shutdown_signal(), jobs).await;
}
