use crate::config::AppConfig;
use crate::storage::Storage;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 确保上传目录结构存在
fn ensure_upload_dirs() {
    let config = AppConfig::get();
    for dir in [config.attachment_dir(), config.submission_dir()] {
        if !Path::new(&dir).exists() {
            std::fs::create_dir_all(&dir)
                .unwrap_or_else(|e| panic!("Failed to create upload directory {dir}: {e}"));
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化（含迁移）和上传目录创建
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    ensure_upload_dirs();

    StartupContext { storage }
}
