use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// The operations of the Notion API exposed by the proxy.
///
/// Every method takes the argument object documented by Notion (path
/// parameters such as `block_id` included) and yields the response JSON
/// as-is.
#[async_trait]
pub trait NotionApi: Send + Sync {
    async fn retrieve_block(&self, args: Value) -> Result<Value>;
    async fn update_block(&self, args: Value) -> Result<Value>;
    async fn delete_block(&self, args: Value) -> Result<Value>;
    async fn list_block_children(&self, args: Value) -> Result<Value>;
    async fn append_block_children(&self, args: Value) -> Result<Value>;

    async fn retrieve_page(&self, args: Value) -> Result<Value>;
    async fn update_page(&self, args: Value) -> Result<Value>;
    async fn retrieve_page_property(&self, args: Value) -> Result<Value>;

    async fn list_users(&self, args: Value) -> Result<Value>;
    async fn retrieve_user(&self, args: Value) -> Result<Value>;

    async fn search(&self, args: Value) -> Result<Value>;

    async fn retrieve_database(&self, args: Value) -> Result<Value>;
    async fn update_database(&self, args: Value) -> Result<Value>;
    async fn query_database(&self, args: Value) -> Result<Value>;
}
