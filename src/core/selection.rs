use crate::core::contact_list::ContactListController;
use crate::core::mutation::MutationCoordinator;
use crate::domain::model::{Contact, ContactStatus};
use crate::utils::error::{ConsoleError, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// 詳細檢視中的單一訊息
pub struct ContactSelection {
    list: Arc<ContactListController>,
    mutations: Arc<MutationCoordinator>,
    selected: Mutex<Option<Contact>>,
}

impl ContactSelection {
    pub fn new(list: Arc<ContactListController>, mutations: Arc<MutationCoordinator>) -> Self {
        Self {
            list,
            mutations,
            selected: Mutex::new(None),
        }
    }

    /// 開啟訊息；未讀的訊息會自動標記為已讀（唯一的自動變更）。
    ///
    /// 狀態以列表中的最新版本為準，呼叫端手上的舊副本不會再觸發一次已讀。
    pub async fn select(&self, contact: Contact) -> Result<()> {
        let contact = self.list.find(&contact.id).unwrap_or(contact);
        let implicit_read = contact.status == ContactStatus::Unread;
        let id = contact.id.clone();
        *self.selected.lock() = Some(contact);

        if !implicit_read {
            return Ok(());
        }

        match self.mutations.update_status(&id, ContactStatus::Read).await {
            Err(ConsoleError::MutationInFlight) => {
                tracing::debug!("Contact {} opened while a mutation is pending", id);
                Ok(())
            }
            other => other,
        }
    }

    pub fn clear(&self) {
        *self.selected.lock() = None;
    }

    /// 目前檢視中的訊息，若仍在列表中則取最新版本
    pub fn selected(&self) -> Option<Contact> {
        let selected = self.selected.lock().clone()?;
        self.list.find(&selected.id).or(Some(selected))
    }

    pub async fn mark_replied(&self) -> Result<()> {
        let Some(id) = self.selected.lock().as_ref().map(|contact| contact.id.clone()) else {
            return Ok(());
        };
        self.mutations.update_status(&id, ContactStatus::Replied).await
    }
}
