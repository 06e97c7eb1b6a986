use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info, warn};

use vehicle_configurator::config::environment::EnvironmentConfig;
use vehicle_configurator::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let default_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let level = std::env::var("RUST_LOG_LEVEL")
        .ok()
        .and_then(|value| value.parse::<tracing::Level>().ok())
        .unwrap_or(default_level);

    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚗 Vehicle Configurator");
    info!("================================================");
    info!("🌐 Backend: {}", config.api_base_url);

    let state = match AppState::initialize(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error inicializando la aplicación: {}", e);
            return Err(anyhow::anyhow!("Error de inicialización: {}", e));
        }
    };

    match state.current_vehicle() {
        Some(vehicle) => info!("🚙 Vehículo actual: {} ({})", vehicle.label(), vehicle.id),
        None => info!("📭 No hay vehículo configurado"),
    }

    let origins = state.catalog_provider().list_origins().await;
    if origins.is_empty() {
        warn!("⚠️ No se pudieron cargar los orígenes del catálogo");
    } else {
        info!("🌍 Orígenes disponibles:");
        for origin in &origins {
            info!("   {} - {} marcas", origin.name, origin.make_count.unwrap_or(0));
        }
    }

    Ok(())
}
