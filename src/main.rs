use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use garage_ledger::config::database::DatabaseConfig;
use garage_ledger::config::environment::EnvironmentConfig;
use garage_ledger::routes::create_app_router;
use garage_ledger::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Garage Ledger - Libreta de Mantenimiento Vehicular");
    info!("=====================================================");

    // Inicializar base de datos
    let pool = match DatabaseConfig::default().create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ Base de datos conectada");

    // Crear router de la API
    let config = EnvironmentConfig::default();
    let host = config.host.clone();
    let port = config.port;
    let app_state = AppState::new(pool, config);
    let app = create_app_router(app_state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos propios");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("🔧 Endpoints - Maintenance:");
    info!("   POST /api/record - Registrar servicio");
    info!("   GET  /api/record/vehicle/:vehicle_id - Historial del vehículo");
    info!("🔁 Endpoints - Transfer:");
    info!("   POST /api/transfer/:id/code - Generar código de transferencia");
    info!("   POST /api/transfer/claim - Reclamar vehículo por código");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
