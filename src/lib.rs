pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{AssumeYes, ConsoleNotifier, HttpGateway, StdinPrompt};
pub use crate::config::ConsoleConfig;
pub use crate::core::{
    console::AdminConsole, contact_list::ContactListController, inventory::InventoryController,
    mutation::MutationCoordinator, selection::ContactSelection, AccessState, FetchOutcome,
};
pub use crate::domain::model::{
    Contact, ContactCounts, ContactQuery, ContactStatus, InventoryItem, InventoryStats, QueryPatch,
    StatusFilter, StockLevel,
};
pub use crate::domain::session::SessionContext;
pub use crate::utils::error::{ConsoleError, Result};
