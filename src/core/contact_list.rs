use crate::core::{AccessState, FetchOutcome};
use crate::domain::aggregate;
use crate::domain::model::{Contact, ContactCounts, ContactPage, ContactQuery, QueryPatch};
use crate::domain::ports::{EntityGateway, Notifier};
use crate::domain::session::SessionContext;
use parking_lot::Mutex;
use std::sync::Arc;

/// 目前顯示中的聯絡訊息列表
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactListView {
    pub query: ContactQuery,
    pub contacts: Vec<Contact>,
    pub counts: ContactCounts,
    pub loading: bool,
    pub access: AccessState,
}

#[derive(Debug, Default)]
struct ListState {
    view: ContactListView,
    /// 每次發出查詢就遞增；只有目前世代的回應可以寫入
    generation: u64,
}

/// 擁有查詢條件與顯示中的列表，並保證只有最新查詢的結果會被提交
pub struct ContactListController {
    gateway: Arc<dyn EntityGateway>,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ListState>,
}

impl ContactListController {
    pub fn new(
        gateway: Arc<dyn EntityGateway>,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            session,
            notifier,
            state: Mutex::new(ListState::default()),
        }
    }

    pub fn snapshot(&self) -> ContactListView {
        self.state.lock().view.clone()
    }

    pub fn query(&self) -> ContactQuery {
        self.state.lock().view.query.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().view.loading
    }

    pub fn find(&self, id: &str) -> Option<Contact> {
        self.state
            .lock()
            .view
            .contacts
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
    }

    /// 合併查詢條件；條件真的改變時才重新查詢
    pub async fn set_query(&self, patch: QueryPatch) -> FetchOutcome {
        let changed = self.state.lock().view.query.apply(patch);
        if !changed {
            tracing::debug!("Query unchanged, skipping fetch");
            return FetchOutcome::Unchanged;
        }
        self.fetch().await
    }

    /// 以目前的查詢條件重新查詢
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch().await
    }

    async fn fetch(&self) -> FetchOutcome {
        let credential = match self.session.credential() {
            Ok(credential) => credential,
            Err(_) => {
                let mut state = self.state.lock();
                state.generation += 1;
                let view = &mut state.view;
                view.contacts.clear();
                view.counts = ContactCounts::default();
                view.loading = false;
                view.access = AccessState::AuthorizationRequired;
                tracing::warn!("🔒 No admin credential, contact list requires authorization");
                return FetchOutcome::Unauthorized;
            }
        };

        let (generation, query) = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.view.loading = true;
            (state.generation, state.view.query.clone())
        };

        tracing::debug!(
            "📡 Fetching contacts (generation {}, search='{}', status={})",
            generation,
            query.search,
            query.status
        );
        let result = self.gateway.list_contacts(&query, credential).await;

        let failure = {
            let mut state = self.state.lock();
            if state.generation != generation {
                tracing::debug!(
                    "Discarding stale contact response (generation {}, current {})",
                    generation,
                    state.generation
                );
                return FetchOutcome::Stale;
            }

            state.view.loading = false;
            match result {
                Ok(page) => {
                    let counts = resolve_counts(&query, &page);
                    tracing::info!(
                        "📂 Loaded {} contacts ({} total, {} unread)",
                        page.contacts.len(),
                        counts.total,
                        counts.unread
                    );
                    state.view.contacts = page.contacts;
                    state.view.counts = counts;
                    state.view.access = AccessState::Ready;
                    None
                }
                Err(e) => Some(e),
            }
        };

        match failure {
            None => FetchOutcome::Committed,
            Some(e) => {
                tracing::warn!("Contact fetch failed, keeping previous list: {}", e);
                self.notifier.error(&e.user_friendly_message());
                FetchOutcome::Failed
            }
        }
    }
}

/// 以伺服器統計為準；缺少時才改用本地計算
fn resolve_counts(query: &ContactQuery, page: &ContactPage) -> ContactCounts {
    match page.counts {
        Some(counts) => {
            if query.is_unfiltered() {
                if let Some(local) = aggregate::contact_counts_divergence(&page.contacts, &counts) {
                    tracing::warn!(
                        "⚠️ Server counts {:?} differ from local counts {:?}",
                        counts,
                        local
                    );
                }
            }
            counts
        }
        None => {
            tracing::warn!("Server omitted contact counts, deriving them locally");
            aggregate::contact_counts(&page.contacts)
        }
    }
}
