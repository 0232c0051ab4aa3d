use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use lastmile_admin::config::environment::EnvironmentConfig;
use lastmile_admin::database::DatabaseConnection;
use lastmile_admin::routes::create_app_router;
use lastmile_admin::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Last Mile Admin - Backend de operaciones logísticas");
    info!("======================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    let config = EnvironmentConfig::default();
    let app_state = AppState::new(pool, config);
    let app = create_app_router(app_state);

    // Puerto del servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📦 Endpoints - Order:");
    info!("   POST /api/order - Crear orden manual");
    info!("   GET  /api/order - Listar órdenes");
    info!("   GET  /api/order/csv-template - Descargar plantilla CSV");
    info!("   POST /api/order/csv-import - Importación masiva desde CSV");
    info!("   GET  /api/order/:id - Obtener orden");
    info!("   PUT  /api/order/:id - Actualizar orden");
    info!("   DELETE /api/order/:id - Eliminar orden");
    info!("🗺️ Endpoints - Route:");
    info!("   POST /api/route - Crear ruta con órdenes asignadas");
    info!("   GET  /api/route - Listar rutas (filtro ?status=)");
    info!("   GET  /api/route/unassigned-orders - Órdenes sin ruta");
    info!("   GET  /api/route/:id - Detalle de ruta con paradas");
    info!("   PUT  /api/route/:id/operator - Asignar operador");
    info!("   PUT  /api/route/:id/status - Cambiar estado");
    info!("🚗 Endpoints - Operator:");
    info!("   POST /api/operator - Registrar operador");
    info!("   GET  /api/operator - Listar operadores");
    info!("   GET  /api/operator/:id - Detalle con documentos y vehículos");
    info!("   PUT  /api/operator/:id - Actualizar operador");
    info!("   DELETE /api/operator/:id - Eliminar operador");
    info!("   POST /api/operator/:id/document - Subir documento");
    info!("   GET  /api/operator/:id/document - Listar documentos");
    info!("   GET  /api/operator/:id/document/:doc_id/url - URL firmada");
    info!("   DELETE /api/operator/:id/document/:doc_id - Eliminar documento");
    info!("   POST /api/operator/:id/vehicle - Registrar vehículo");
    info!("   GET  /api/operator/:id/vehicle - Listar vehículos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

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
