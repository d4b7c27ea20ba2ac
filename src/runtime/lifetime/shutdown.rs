use tokio::signal;
use tracing::{error, warn};

use crate::services::websocket::get_online_count;

pub async fn listen_for_shutdown() {
    // 等待 Ctrl+C 信号
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!(
        "Shutdown signal received, closing {} chat connection(s)...",
        get_online_count()
    );
}
