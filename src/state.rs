use std::sync::Arc;

use crate::{config::Config, store::UrlStore};

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<UrlStore>,
    pub base_url: String,
    pub port: String,
}

impl AppState {
    pub fn new(store: Arc<UrlStore>, config: &Config) -> Self {
        Self {
            store,
            base_url: config.base_url.clone(),
            port: config.port.clone(),
        }
    }

    // literal join; BASE_URL is not normalised
    pub fn short_link(&self, key: &str) -> String {
        format!("{}:{}/short/{}", self.base_url, self.port, key)
    }
}
