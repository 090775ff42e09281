use crate::core::contact_list::ContactListController;
use crate::domain::model::{ContactStatus, Operation, ResourceKind};
use crate::domain::ports::{ConfirmationPrompt, EntityGateway, Notifier};
use crate::domain::session::SessionContext;
use crate::utils::error::{ConsoleError, Result};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const DELETE_CONFIRMATION: &str = "Delete this message?";

/// 離開作用域時釋放 mutation gate
struct GateGuard<'a>(&'a AtomicBool);

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 序列化所有會改變伺服器狀態的操作：同一時間最多一個在進行中。
///
/// 成功後一律重新查詢列表，不在本地修補資料；失敗時只通知，不動列表。
pub struct MutationCoordinator {
    gateway: Arc<dyn EntityGateway>,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
    prompt: Arc<dyn ConfirmationPrompt>,
    list: Arc<ContactListController>,
    gate: AtomicBool,
    timeout: Option<Duration>,
}

impl MutationCoordinator {
    pub fn new(
        gateway: Arc<dyn EntityGateway>,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
        prompt: Arc<dyn ConfirmationPrompt>,
        list: Arc<ContactListController>,
    ) -> Self {
        Self {
            gateway,
            session,
            notifier,
            prompt,
            list,
            gate: AtomicBool::new(false),
            timeout: None,
        }
    }

    /// 限制單一變更請求的等待時間；None 代表無限等待
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.gate.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Result<GateGuard<'_>> {
        self.gate
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| GateGuard(&self.gate))
            .map_err(|_| {
                tracing::debug!("Mutation rejected, another one is in flight");
                ConsoleError::MutationInFlight
            })
    }

    pub async fn update_status(&self, id: &str, status: ContactStatus) -> Result<()> {
        let credential = self.session.credential()?;
        let _gate = self.acquire()?;

        tracing::info!("✏️ Setting contact {} to {}", id, status);
        let call = self.gateway.update_contact_status(id, status, credential);
        match self.bounded(Operation::UpdateStatus, call).await {
            Ok(()) => {
                self.list.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let credential = self.session.credential()?;
        let _gate = self.acquire()?;

        if !self.prompt.confirm(DELETE_CONFIRMATION) {
            tracing::debug!("Delete of contact {} declined", id);
            return Err(ConsoleError::UserCancelled);
        }

        tracing::info!("🗑️ Deleting contact {}", id);
        let call = self.gateway.delete_contact(id, credential);
        match self.bounded(Operation::Delete, call).await {
            Ok(()) => {
                self.notifier.success("Message deleted");
                self.list.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    async fn bounded<F>(&self, operation: Operation, call: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                Err(ConsoleError::request_failed(
                    ResourceKind::Contacts,
                    operation,
                    format!("no response within {:?}", limit),
                ))
            }),
            None => call.await,
        }
    }

    fn report(&self, error: ConsoleError) -> ConsoleError {
        tracing::warn!("Mutation failed, list left unchanged: {}", error);
        self.notifier.error(&error.user_friendly_message());
        error
    }
}
