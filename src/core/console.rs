use crate::adapters::HttpGateway;
use crate::config::ConsoleConfig;
use crate::core::contact_list::ContactListController;
use crate::core::inventory::InventoryController;
use crate::core::mutation::MutationCoordinator;
use crate::core::selection::ContactSelection;
use crate::domain::ports::{ConfirmationPrompt, EntityGateway, Notifier};
use crate::domain::session::SessionContext;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// 把各個控制器接在同一個 gateway 與 session 上
pub struct AdminConsole {
    pub session: Arc<SessionContext>,
    pub contacts: Arc<ContactListController>,
    pub mutations: Arc<MutationCoordinator>,
    pub selection: ContactSelection,
    pub inventory: InventoryController,
}

impl AdminConsole {
    pub fn new(
        gateway: Arc<dyn EntityGateway>,
        session: SessionContext,
        notifier: Arc<dyn Notifier>,
        prompt: Arc<dyn ConfirmationPrompt>,
        mutation_timeout: Option<Duration>,
    ) -> Self {
        let session = Arc::new(session);
        let contacts = Arc::new(ContactListController::new(
            gateway.clone(),
            session.clone(),
            notifier.clone(),
        ));
        let mutations = Arc::new(
            MutationCoordinator::new(
                gateway.clone(),
                session.clone(),
                notifier.clone(),
                prompt,
                contacts.clone(),
            )
            .with_timeout(mutation_timeout),
        );
        let selection = ContactSelection::new(contacts.clone(), mutations.clone());
        let inventory = InventoryController::new(gateway, session.clone(), notifier);

        Self {
            session,
            contacts,
            mutations,
            selection,
            inventory,
        }
    }

    /// 依配置建立 HTTP gateway；`token` 優先於配置中的 session.token
    pub fn from_config(
        config: &ConsoleConfig,
        token: Option<String>,
        notifier: Arc<dyn Notifier>,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> Result<Self> {
        let gateway = HttpGateway::new(config.base_url(), config.request_timeout())?;
        let session = SessionContext::new(token.or_else(|| config.session_token()));
        if !session.is_authorized() {
            tracing::warn!("🔒 Starting without an admin credential");
        }

        Ok(Self::new(
            Arc::new(gateway),
            session,
            notifier,
            prompt,
            config.mutation_timeout(),
        ))
    }
}
