use crate::core::{AccessState, FetchOutcome};
use crate::domain::aggregate;
use crate::domain::model::{InventoryItem, InventorySnapshot, InventoryStats, StockLevel};
use crate::domain::ports::{EntityGateway, Notifier};
use crate::domain::session::SessionContext;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryView {
    pub stats: InventoryStats,
    pub low_stock_items: Vec<InventoryItem>,
    pub loading: bool,
    pub access: AccessState,
}

impl InventoryView {
    pub fn classified_alerts(&self) -> Vec<(&InventoryItem, StockLevel)> {
        self.low_stock_items
            .iter()
            .map(|item| (item, item.stock_level()))
            .collect()
    }
}

#[derive(Debug, Default)]
struct InventoryState {
    view: InventoryView,
    generation: u64,
    /// `view.stats` 來自伺服器（而非警示清單推導）
    stats_from_authority: bool,
}

/// 唯讀的庫存概況：統計與低庫存警示
pub struct InventoryController {
    gateway: Arc<dyn EntityGateway>,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<InventoryState>,
}

impl InventoryController {
    pub fn new(
        gateway: Arc<dyn EntityGateway>,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            session,
            notifier,
            state: Mutex::new(InventoryState::default()),
        }
    }

    pub fn snapshot(&self) -> InventoryView {
        self.state.lock().view.clone()
    }

    pub async fn refresh(&self) -> FetchOutcome {
        let Ok(credential) = self.session.credential() else {
            let mut state = self.state.lock();
            state.generation += 1;
            state.view = InventoryView {
                access: AccessState::AuthorizationRequired,
                ..InventoryView::default()
            };
            state.stats_from_authority = false;
            tracing::warn!("🔒 No admin credential, inventory requires authorization");
            return FetchOutcome::Unauthorized;
        };

        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.view.loading = true;
            state.generation
        };

        let result = self.gateway.inventory_snapshot(credential).await;

        let failure = {
            let mut state = self.state.lock();
            if state.generation != generation {
                tracing::debug!("Discarding stale inventory response (generation {})", generation);
                return FetchOutcome::Stale;
            }

            state.view.loading = false;
            match result {
                Ok(snapshot) => {
                    let previous = state.stats_from_authority.then_some(state.view.stats);
                    let stats = resolve_stats(&snapshot, previous);
                    state.stats_from_authority |= snapshot.stats.is_some();
                    tracing::info!(
                        "📦 Inventory: {} products, {} low, {} out of stock",
                        stats.total_products,
                        stats.low_stock,
                        stats.out_of_stock
                    );
                    state.view.stats = stats;
                    state.view.low_stock_items = snapshot.low_stock_items;
                    state.view.access = AccessState::Ready;
                    None
                }
                Err(e) => Some(e),
            }
        };

        match failure {
            None => FetchOutcome::Committed,
            Some(e) => {
                tracing::warn!("Inventory fetch failed, keeping previous snapshot: {}", e);
                self.notifier.error(&e.user_friendly_message());
                FetchOutcome::Failed
            }
        }
    }
}

/// 伺服器統計優先；缺少時保留上一次的伺服器統計，從未取得過才以警示清單推導
fn resolve_stats(
    snapshot: &InventorySnapshot,
    previous: Option<InventoryStats>,
) -> InventoryStats {
    for item in aggregate::misclassified_alerts(&snapshot.low_stock_items) {
        tracing::warn!(
            "⚠️ '{}' is in the low stock list but classifies as in-stock ({} > {})",
            item.name,
            item.stock,
            item.threshold
        );
    }

    if let Some(stats) = snapshot.stats {
        return stats;
    }
    match previous {
        Some(stats) => {
            tracing::warn!("Server omitted inventory stats, keeping the previous ones");
            stats
        }
        None => {
            tracing::warn!(
                "Server omitted inventory stats, counting the alert list only (totals exclude \
                 products above their threshold)"
            );
            aggregate::inventory_stats(&snapshot.low_stock_items)
        }
    }
}
