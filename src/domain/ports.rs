use crate::domain::model::{ContactPage, ContactQuery, ContactStatus, InventorySnapshot};
use crate::domain::session::Credential;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 與遠端服務之間唯一的通道。失敗一律是 `ConsoleError::RequestFailed`。
///
/// `list_contacts` 與 `inventory_snapshot` 可以安全重試；變更類呼叫不可由核心自動重試。
#[async_trait]
pub trait EntityGateway: Send + Sync {
    async fn list_contacts(
        &self,
        query: &ContactQuery,
        credential: &Credential,
    ) -> Result<ContactPage>;

    async fn update_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
        credential: &Credential,
    ) -> Result<()>;

    async fn delete_contact(&self, id: &str, credential: &Credential) -> Result<()>;

    async fn inventory_snapshot(&self, credential: &Credential) -> Result<InventorySnapshot>;
}

/// 單次通知，不保證送達
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// 破壞性操作前的是/否確認
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}
