#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use notion_client::{ApiErrorCode, NotionApi, NotionClientError, Result};
use notion_proxy::NotionContext;
use serde_json::Value;

type Reply = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// In-memory [`NotionApi`] that records every call and answers with a
/// configurable reply.
#[derive(Clone)]
pub struct StubNotion {
    calls: Arc<Mutex<Vec<(&'static str, Value)>>>,
    reply: Reply,
}

impl StubNotion {
    pub fn replying(reply: impl Fn(&Value) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self { calls: Arc::default(), reply: Arc::new(reply) }
    }

    pub fn ok(value: Value) -> Self {
        Self::replying(move |_| Ok(value.clone()))
    }

    /// Echoes the received arguments back.
    pub fn echo() -> Self {
        Self::replying(|args| Ok(args.clone()))
    }

    pub fn not_found() -> Self {
        Self::replying(|_| {
            Err(NotionClientError::Api { status: 404, code: ApiErrorCode::ObjectNotFound, message: "Not found".into() })
        })
    }

    pub fn calls(&self) -> Vec<(&'static str, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn context(&self) -> NotionContext {
        NotionContext::new(Arc::new(self.clone()))
    }

    fn record(&self, operation: &'static str, args: Value) -> Result<Value> {
        let reply = (self.reply)(&args);
        self.calls.lock().unwrap().push((operation, args));
        reply
    }
}

#[async_trait]
impl NotionApi for StubNotion {
    async fn retrieve_block(&self, args: Value) -> Result<Value> {
        self.record("blocks.retrieve", args)
    }

    async fn update_block(&self, args: Value) -> Result<Value> {
        self.record("blocks.update", args)
    }

    async fn delete_block(&self, args: Value) -> Result<Value> {
        self.record("blocks.delete", args)
    }

    async fn list_block_children(&self, args: Value) -> Result<Value> {
        self.record("blocks.children.list", args)
    }

    async fn append_block_children(&self, args: Value) -> Result<Value> {
        self.record("blocks.children.append", args)
    }

    async fn retrieve_page(&self, args: Value) -> Result<Value> {
        self.record("pages.retrieve", args)
    }

    async fn update_page(&self, args: Value) -> Result<Value> {
        self.record("pages.update", args)
    }

    async fn retrieve_page_property(&self, args: Value) -> Result<Value> {
        self.record("pages.properties.retrieve", args)
    }

    async fn list_users(&self, args: Value) -> Result<Value> {
        self.record("users.list", args)
    }

    async fn retrieve_user(&self, args: Value) -> Result<Value> {
        self.record("users.retrieve", args)
    }

    async fn search(&self, args: Value) -> Result<Value> {
        self.record("search", args)
    }

    async fn retrieve_database(&self, args: Value) -> Result<Value> {
        self.record("databases.retrieve", args)
    }

    async fn update_database(&self, args: Value) -> Result<Value> {
        self.record("databases.update", args)
    }

    async fn query_database(&self, args: Value) -> Result<Value> {
        self.record("databases.query", args)
    }
}
