use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use syncpilot::application::ports::{Clock, ClusterClient, JobLauncher, SqlGateway};
use syncpilot::application::services::{JobRegistry, JobService, JobServiceOptions};
use syncpilot::infrastructure::FixedOffsetClock;
use syncpilot::infrastructure::cluster::{FlinkCliLauncher, FlinkRestClient};
use syncpilot::infrastructure::observability::{TracingConfig, init_tracing};
use syncpilot::infrastructure::sql::MySqlGateway;
use syncpilot::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(
        TracingConfig {
            environment: settings.environment.to_string(),
            json_format: settings.environment == Environment::Prod
                || TracingConfig::default().json_format,
        },
        settings.server.port,
    );

    let cluster: Arc<dyn ClusterClient> = Arc::new(FlinkRestClient::new(&settings.flink.rest_url));
    let launcher: Arc<dyn JobLauncher> = Arc::new(FlinkCliLauncher::new(
        settings.flink.home.clone(),
        settings.flink.entry_class.clone(),
        settings.flink.pipeline_jar.clone(),
        Duration::from_secs(settings.flink.submit_timeout_secs),
    ));
    let clock: Arc<dyn Clock> = Arc::new(FixedOffsetClock::default());
    let registry = Arc::new(JobRegistry::new());

    let job_service = Arc::new(JobService::new(
        registry,
        launcher,
        Arc::clone(&cluster),
        clock,
        JobServiceOptions {
            config_dir: settings.jobs.config_dir.clone(),
            ..JobServiceOptions::default()
        },
    ));
    let sql_gateway: Arc<dyn SqlGateway> = Arc::new(MySqlGateway::new());

    let state = AppState {
        job_service,
        sql_gateway,
        cluster,
    };
    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
