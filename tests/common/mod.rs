#![allow(dead_code)]

use async_trait::async_trait;
use backoffice_sync::core::{ConfirmationPrompt, EntityGateway, Notifier};
use backoffice_sync::domain::model::{
    ContactPage, InventorySnapshot, Operation, ResourceKind,
};
use backoffice_sync::domain::session::Credential;
use backoffice_sync::{
    AdminConsole, ConsoleError, Contact, ContactCounts, ContactQuery, ContactStatus, InventoryItem,
    InventoryStats, Result, SessionContext,
};
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ContactQuery),
    UpdateStatus(String, ContactStatus),
    Delete(String),
    Inventory,
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::UpdateStatus(..) | Call::Delete(_))
    }
}

/// 模擬遠端服務：保存資料、記錄呼叫，並可暫停或讓指定呼叫失敗
#[derive(Default)]
pub struct FakeAuthority {
    contacts: Mutex<Vec<Contact>>,
    inventory: Mutex<InventorySnapshot>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<Operation>>,
    hanging: Mutex<HashSet<Operation>>,
    failing_list_calls: Mutex<HashSet<usize>>,
    list_holds: Mutex<HashMap<usize, oneshot::Receiver<()>>>,
    inventory_holds: Mutex<HashMap<usize, oneshot::Receiver<()>>>,
    mutation_hold: Mutex<Option<oneshot::Receiver<()>>>,
    omit_counts: AtomicBool,
}

impl FakeAuthority {
    pub fn with_contacts(contacts: Vec<Contact>) -> Arc<Self> {
        let authority = Self::default();
        *authority.contacts.lock().unwrap() = contacts;
        Arc::new(authority)
    }

    pub fn with_inventory(snapshot: InventorySnapshot) -> Arc<Self> {
        let authority = Self::default();
        *authority.inventory.lock().unwrap() = snapshot;
        Arc::new(authority)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutation_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::List(_)))
            .count()
    }

    pub fn inventory_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Inventory))
            .count()
    }

    pub fn set_inventory(&self, snapshot: InventorySnapshot) {
        *self.inventory.lock().unwrap() = snapshot;
    }

    pub fn fail(&self, operation: Operation) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.failing.lock().unwrap().remove(&operation);
    }

    pub fn hang(&self, operation: Operation) {
        self.hanging.lock().unwrap().insert(operation);
    }

    pub fn unhang(&self, operation: Operation) {
        self.hanging.lock().unwrap().remove(&operation);
    }

    pub fn omit_counts(&self) {
        self.omit_counts.store(true, Ordering::SeqCst);
    }

    /// 第 n 次（從 1 起算）列表查詢會等到送出訊號才回應
    pub fn hold_list_call(&self, n: usize) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.list_holds.lock().unwrap().insert(n, rx);
        tx
    }

    /// 第 n 次（從 1 起算）庫存查詢會等到送出訊號才回應
    pub fn hold_inventory_call(&self, n: usize) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inventory_holds.lock().unwrap().insert(n, rx);
        tx
    }

    pub fn fail_list_call(&self, n: usize) {
        self.failing_list_calls.lock().unwrap().insert(n);
    }

    /// 下一個變更請求會等到送出訊號才回應
    pub fn hold_next_mutation(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.mutation_hold.lock().unwrap() = Some(rx);
        tx
    }

    pub fn stored_status(&self, id: &str) -> Option<ContactStatus> {
        self.contacts
            .lock()
            .unwrap()
            .iter()
            .find(|contact| contact.id == id)
            .map(|contact| contact.status)
    }

    fn fails(&self, operation: Operation) -> bool {
        self.failing.lock().unwrap().contains(&operation)
    }

    fn hangs(&self, operation: Operation) -> bool {
        self.hanging.lock().unwrap().contains(&operation)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn settle_mutation(&self, operation: Operation) -> Result<()> {
        let hold = self.mutation_hold.lock().unwrap().take();
        if let Some(hold) = hold {
            let _ = hold.await;
        }
        if self.hangs(operation) {
            std::future::pending::<()>().await;
        }
        if self.fails(operation) {
            return Err(ConsoleError::request_failed(
                ResourceKind::Contacts,
                operation,
                "HTTP 500",
            ));
        }
        Ok(())
    }
}

/// 伺服器端的計數方式，獨立於 aggregate 模組
pub fn authority_counts(contacts: &[Contact]) -> ContactCounts {
    let count = |status: ContactStatus| {
        contacts
            .iter()
            .filter(|contact| contact.status == status)
            .count() as u64
    };
    ContactCounts {
        total: contacts.len() as u64,
        unread: count(ContactStatus::Unread),
        read: count(ContactStatus::Read),
        replied: count(ContactStatus::Replied),
    }
}

#[async_trait]
impl EntityGateway for FakeAuthority {
    async fn list_contacts(
        &self,
        query: &ContactQuery,
        _credential: &Credential,
    ) -> Result<ContactPage> {
        self.record(Call::List(query.clone()));
        let index = self.list_calls();
        let hold = self.list_holds.lock().unwrap().remove(&index);

        // 回應反映發出請求當下的資料
        let page = {
            let contacts = self.contacts.lock().unwrap();
            ContactPage {
                contacts: contacts
                    .iter()
                    .filter(|contact| query.status.accepts(contact.status))
                    .filter(|contact| contact.matches_search(&query.search))
                    .cloned()
                    .collect(),
                counts: (!self.omit_counts.load(Ordering::SeqCst))
                    .then(|| authority_counts(&contacts)),
            }
        };

        if let Some(hold) = hold {
            let _ = hold.await;
        }

        let failing_call = self.failing_list_calls.lock().unwrap().contains(&index);
        if failing_call || self.fails(Operation::List) {
            return Err(ConsoleError::request_failed(
                ResourceKind::Contacts,
                Operation::List,
                "HTTP 503",
            ));
        }
        Ok(page)
    }

    async fn update_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
        _credential: &Credential,
    ) -> Result<()> {
        self.record(Call::UpdateStatus(id.to_string(), status));
        self.settle_mutation(Operation::UpdateStatus).await?;

        if let Some(contact) = self
            .contacts
            .lock()
            .unwrap()
            .iter_mut()
            .find(|contact| contact.id == id)
        {
            contact.status = status;
        }
        Ok(())
    }

    async fn delete_contact(&self, id: &str, _credential: &Credential) -> Result<()> {
        self.record(Call::Delete(id.to_string()));
        self.settle_mutation(Operation::Delete).await?;

        self.contacts.lock().unwrap().retain(|contact| contact.id != id);
        Ok(())
    }

    async fn inventory_snapshot(&self, _credential: &Credential) -> Result<InventorySnapshot> {
        self.record(Call::Inventory);
        let index = self.inventory_calls();
        let hold = self.inventory_holds.lock().unwrap().remove(&index);
        let snapshot = self.inventory.lock().unwrap().clone();

        if let Some(hold) = hold {
            let _ = hold.await;
        }

        if self.fails(Operation::List) {
            return Err(ConsoleError::request_failed(
                ResourceKind::Inventory,
                Operation::List,
                "HTTP 502",
            ));
        }
        Ok(snapshot)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

pub struct ScriptedPrompt {
    answer: bool,
    asked: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            asked: AtomicUsize::new(0),
        })
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn confirm(&self, _question: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

pub struct Harness {
    pub authority: Arc<FakeAuthority>,
    pub notifier: Arc<RecordingNotifier>,
    pub prompt: Arc<ScriptedPrompt>,
    pub console: AdminConsole,
}

impl Harness {
    pub fn new(authority: Arc<FakeAuthority>) -> Self {
        Self::build(authority, SessionContext::new(Some("test-token".to_string())), true)
    }

    pub fn anonymous(authority: Arc<FakeAuthority>) -> Self {
        Self::build(authority, SessionContext::anonymous(), true)
    }

    pub fn declining(authority: Arc<FakeAuthority>) -> Self {
        Self::build(authority, SessionContext::new(Some("test-token".to_string())), false)
    }

    fn build(authority: Arc<FakeAuthority>, session: SessionContext, confirm: bool) -> Self {
        let notifier = Arc::new(RecordingNotifier::default());
        let prompt = ScriptedPrompt::answering(confirm);
        let console = AdminConsole::new(
            authority.clone(),
            session,
            notifier.clone(),
            prompt.clone(),
            Some(Duration::from_secs(5)),
        );
        Self {
            authority,
            notifier,
            prompt,
            console,
        }
    }
}

pub fn contact(id: &str, status: ContactStatus) -> Contact {
    Contact {
        id: id.to_string(),
        name: format!("Customer {}", id),
        email: format!("customer{}@example.com", id),
        subject: format!("Question {}", id),
        message: "Hello, I have a question about my order.".to_string(),
        status,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    }
}

pub fn named_contact(id: &str, status: ContactStatus, name: &str) -> Contact {
    Contact {
        name: name.to_string(),
        ..contact(id, status)
    }
}

pub fn item(id: &str, name: &str, stock: u32, threshold: u32) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        stock,
        threshold,
    }
}

pub fn stats(
    total_products: u64,
    low_stock: u64,
    out_of_stock: u64,
    in_stock: u64,
) -> InventoryStats {
    InventoryStats {
        total_products,
        low_stock,
        out_of_stock,
        in_stock,
    }
}

pub fn ids(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|contact| contact.id.as_str()).collect()
}
