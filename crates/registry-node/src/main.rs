use anyhow::{Context, Result};
use custody_telemetry::{init_logging, TelemetryConfig};
use registry_node::{run_demo, DemoAccounts, NodeConfig, NodeRuntime};
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::load().context("invalid node configuration")?;
    init_logging(&TelemetryConfig::from_env()).context("failed to initialize logging")?;

    let mut runtime = NodeRuntime::new(config);
    runtime.start();

    if runtime.config().demo {
        let accounts = DemoAccounts::with_admin(runtime.config().admin);
        if let Err(e) = run_demo(runtime.handler(), accounts) {
            error!(error = %e, "Demo failed");
            runtime.shutdown().await;
            return Err(e);
        }
    } else {
        info!("Serving JSON requests on stdin. Press Ctrl+C to stop.");
        let stdin = BufReader::new(tokio::io::stdin());
        tokio::select! {
            served = runtime.serve_lines(stdin, tokio::io::stdout()) => {
                info!(served = served?, "Input closed");
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Interrupted");
            }
        }
    }

    runtime.shutdown().await;
    Ok(())
}
