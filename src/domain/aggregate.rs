//! 從實體集合推導統計。伺服器提供的統計才是權威值，這裡的結果只用於
//! 伺服器未提供時的備援，以及交叉比對。

use crate::domain::model::{
    Contact, ContactCounts, ContactStatus, InventoryItem, InventoryStats, StockLevel,
};

pub fn contact_counts(contacts: &[Contact]) -> ContactCounts {
    contacts.iter().fold(ContactCounts::default(), |mut counts, contact| {
        counts.total += 1;
        match contact.status {
            ContactStatus::Unread => counts.unread += 1,
            ContactStatus::Read => counts.read += 1,
            ContactStatus::Replied => counts.replied += 1,
        }
        counts
    })
}

pub fn inventory_stats(items: &[InventoryItem]) -> InventoryStats {
    items.iter().fold(InventoryStats::default(), |mut stats, item| {
        stats.total_products += 1;
        match item.stock_level() {
            StockLevel::OutOfStock => stats.out_of_stock += 1,
            StockLevel::LowStock => stats.low_stock += 1,
            StockLevel::InStock => stats.in_stock += 1,
        }
        stats
    })
}

/// 本地計數與伺服器計數不一致時回傳本地結果
pub fn contact_counts_divergence(
    contacts: &[Contact],
    authority: &ContactCounts,
) -> Option<ContactCounts> {
    let local = contact_counts(contacts);
    (local != *authority).then_some(local)
}

/// 低庫存警示中，本地規則判定為 in-stock 的項目
pub fn misclassified_alerts(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items
        .iter()
        .filter(|item| item.stock_level() == StockLevel::InStock)
        .collect()
}
