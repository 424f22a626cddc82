use std::sync::Arc;

use clap::Parser;
use poem::{listener::TcpListener, Server};

use ephrathah_backend::api;
use ephrathah_backend::cli::{self, Cli, Commands};
use ephrathah_backend::config::{
    connect_database, init_logging, migrate_database, BootstrapSettings, EnvironmentProvider,
    SystemEnvironment,
};
use ephrathah_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let env_provider: Arc<dyn EnvironmentProvider> = Arc::new(SystemEnvironment);
    init_logging(env_provider.as_ref())?;

    let args = Cli::parse();
    let settings = BootstrapSettings::from_env_provider(env_provider.as_ref())?;

    match args.command() {
        Commands::Migrate => cli::migrate::run_migrations(&settings).await?,
        Commands::Serve => {
            let app_data = init_app_data(&settings, env_provider).await?;
            serve(app_data).await?;
        }
        Commands::Seed => {
            let app_data = init_app_data(&settings, env_provider).await?;
            let summary = cli::seed::seed_demo_users(&app_data).await?;
            println!(
                "Seeded {} users ({} already present)",
                summary.created.len(),
                summary.skipped.len()
            );
        }
        Commands::ExportCsv { output } => {
            let app_data = init_app_data(&settings, env_provider).await?;
            cli::export::export_csv(app_data, output.as_deref()).await?;
        }
    }

    Ok(())
}

/// Connect, migrate and wire every store and provider
async fn init_app_data(
    settings: &BootstrapSettings,
    env_provider: Arc<dyn EnvironmentProvider>,
) -> Result<Arc<AppData>, Box<dyn std::error::Error>> {
    let db = connect_database(settings).await?;
    migrate_database(&db).await?;

    Ok(Arc::new(AppData::init(db, env_provider)?))
}

async fn serve(app_data: Arc<AppData>) -> Result<(), std::io::Error> {
    let address = app_data.settings.server_address();
    let port = app_data.settings.server_port();
    let app = api::routes(app_data, &format!("http://localhost:{}/api", port));

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", port);
    tracing::info!("API endpoints available at http://localhost:{}/api", port);

    Server::new(TcpListener::bind(address)).run(app).await
}
