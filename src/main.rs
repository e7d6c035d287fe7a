//! `resource-server <books|customers>`: serves one CRUD resource.

use doc_crud::infra::{config, database, logging};
use doc_crud::transport;
use doc_crud::{resource_by_name, ResourceController, ResourceRepository};
use tracing::info;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: resource-server <books|customers>\n\
         \n\
         Env vars (all optional):\n\
           DATABASE_URL, <RESOURCE>_DATABASE, <RESOURCE>_BIND_ADDR, DATABASE_MAX_CONNECTIONS, RUST_LOG\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    logging::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let Some(model) = args.first().and_then(|name| resource_by_name(name)) else {
        usage_and_exit();
    };

    let addr = config::bind_addr(model.as_ref())?;

    // A failed connection is logged inside `connect`; the service still starts.
    let store = database::connect(model.as_ref()).await;
    let controller = ResourceController::new(ResourceRepository::new(model.clone(), store));
    let app = transport::http::create_app(transport::http::AppState::new(controller));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("{} API listening on http://{}", model.model_name(), addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
