//! HTTP API and chat widget

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
pub use types::PageInfo;

use crate::chat::ChatHandler;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatHandler>,
    pub page: Arc<PageInfo>,
}

impl AppState {
    pub fn new(chat: ChatHandler, page: PageInfo) -> Self {
        Self {
            chat: Arc::new(chat),
            page: Arc::new(page),
        }
    }
}
