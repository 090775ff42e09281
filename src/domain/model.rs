use crate::utils::error::ConsoleError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 由遠端服務擁有的資源種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Contacts,
    Inventory,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contacts => f.write_str("contacts"),
            Self::Inventory => f.write_str("inventory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    UpdateStatus,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::UpdateStatus => f.write_str("update status"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Unread,
    Read,
    Replied,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 3] = [Self::Unread, Self::Read, Self::Replied];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            other => Err(ConsoleError::InvalidConfigValueError {
                field: "status".to_string(),
                value: other.to_string(),
                reason: "expected one of unread, read, replied".to_string(),
            }),
        }
    }
}

/// 一則客戶來信
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    pub status: ContactStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// 與 search 參數相同的比對規則：名稱、信箱、主旨、內文，不分大小寫
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ContactStatus),
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn accepts(&self, status: ContactStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl From<ContactStatus> for StatusFilter {
    fn from(status: ContactStatus) -> Self {
        Self::Only(status)
    }
}

/// 聯絡訊息列表的查詢狀態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl ContactQuery {
    /// 合併部分更新，回傳查詢是否真的改變
    pub fn apply(&mut self, patch: QueryPatch) -> bool {
        let mut changed = false;
        if let Some(search) = patch.search {
            if search != self.search {
                self.search = search;
                changed = true;
            }
        }
        if let Some(status) = patch.status {
            if status != self.status {
                self.status = status;
                changed = true;
            }
        }
        changed
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty() && self.status == StatusFilter::All
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPatch {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
}

impl QueryPatch {
    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            status: None,
        }
    }

    pub fn status(status: impl Into<StatusFilter>) -> Self {
        Self {
            search: None,
            status: Some(status.into()),
        }
    }

    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = Some(status.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactCounts {
    pub total: u64,
    pub unread: u64,
    pub read: u64,
    pub replied: u64,
}

/// 列表查詢的回應：篩選後的訊息，以及伺服器提供的（未篩選）統計
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    pub counts: Option<ContactCounts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub stock: u32,
    pub threshold: u32,
}

impl InventoryItem {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.stock, self.threshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockLevel {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockLevel {
    pub fn classify(stock: u32, threshold: u32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if stock <= threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfStock => "out-of-stock",
            Self::LowStock => "low-stock",
            Self::InStock => "in-stock",
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
    pub in_stock: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventorySnapshot {
    pub stats: Option<InventoryStats>,
    pub low_stock_items: Vec<InventoryItem>,
}
