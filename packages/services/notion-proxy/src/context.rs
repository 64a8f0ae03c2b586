use notion_client::NotionClientError;

use crate::client::ClientHandle;
use crate::error::{self, NormalizedError};

/// Utilities available to every route handler.
pub trait ServerUtils: Send + Sync {
    fn get_client(&self) -> ClientHandle;

    fn map_error(&self, error: &NotionClientError) -> NormalizedError {
        error::map_error(error)
    }
}

/// Router state built once at startup and shared by all requests.
#[derive(Clone)]
pub struct NotionContext {
    client: ClientHandle,
}

impl NotionContext {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

impl ServerUtils for NotionContext {
    fn get_client(&self) -> ClientHandle {
        self.client.clone()
    }
}
