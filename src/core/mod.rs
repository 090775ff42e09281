pub mod console;
pub mod contact_list;
pub mod inventory;
pub mod mutation;
pub mod selection;

pub use crate::domain::ports::{ConfirmationPrompt, EntityGateway, Notifier};
pub use crate::utils::error::Result;

/// 控制器的存取狀態；缺少憑證時為持續性的阻擋畫面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessState {
    #[default]
    Ready,
    AuthorizationRequired,
}

/// 一次查詢的結果。失敗已在本地處理（保留舊資料並通知），不會往上傳遞。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 回應已寫入顯示狀態
    Committed,
    /// 回應到達時已有更新的查詢，被丟棄
    Stale,
    /// 查詢條件沒有改變，沒有發出請求
    Unchanged,
    /// 沒有憑證，沒有發出請求
    Unauthorized,
    Failed,
}
