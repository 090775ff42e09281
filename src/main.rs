use backoffice_sync::config::{Cli, Command, ContactCommand};
use backoffice_sync::core::ConfirmationPrompt;
use backoffice_sync::domain::model::{Operation, ResourceKind};
use backoffice_sync::utils::error::ErrorSeverity;
use backoffice_sync::utils::{logger, validation::Validate};
use backoffice_sync::{
    AccessState, AdminConsole, AssumeYes, ConsoleConfig, ConsoleError, ConsoleNotifier, Contact,
    ContactStatus, FetchOutcome, QueryPatch, StatusFilter, StdinPrompt,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match ConsoleConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.logging.format.eq_ignore_ascii_case("json") {
        logger::init_json_logger(cli.verbose, &config.logging.level);
    } else {
        logger::init_cli_logger(cli.verbose, &config.logging.level);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!("🚀 Connecting to {}", config.base_url());

    let prompt: Arc<dyn ConfirmationPrompt> = match &cli.command {
        Command::Contacts(ContactCommand::Delete { yes: true, .. }) => Arc::new(AssumeYes),
        _ => Arc::new(StdinPrompt),
    };
    let console =
        AdminConsole::from_config(&config, cli.token.clone(), Arc::new(ConsoleNotifier), prompt)?;

    if let Err(e) = run(&console, cli.command).await {
        tracing::debug!("Command ended with: {} ({:?})", e, e.severity());
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            if let ConsoleError::NotFound { .. } = e {
                eprintln!("❌ {}", e.user_friendly_message());
            }
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(console: &AdminConsole, command: Command) -> Result<(), ConsoleError> {
    match command {
        Command::Inventory => {
            check_fetch(console.inventory.refresh().await, ResourceKind::Inventory)?;
            print_inventory(console);
        }
        Command::Contacts(ContactCommand::List { search, status }) => {
            let status: StatusFilter = status.parse()?;
            let outcome = console
                .contacts
                .set_query(QueryPatch::search(search).with_status(status))
                .await;
            // 預設查詢條件不會觸發重新查詢
            let outcome = match outcome {
                FetchOutcome::Unchanged => console.contacts.refresh().await,
                other => other,
            };
            check_fetch(outcome, ResourceKind::Contacts)?;
            print_contacts(console);
        }
        Command::Contacts(ContactCommand::View { id }) => {
            let contact = load_contact(console, &id).await?;
            console.selection.select(contact).await?;
            if let Some(contact) = console.selection.selected() {
                print_detail(&contact);
            }
        }
        Command::Contacts(ContactCommand::SetStatus { id, status }) => {
            let status: ContactStatus = status.parse()?;
            console.mutations.update_status(&id, status).await?;
            print_contacts(console);
        }
        Command::Contacts(ContactCommand::Reply { id }) => {
            let contact = load_contact(console, &id).await?;
            console.selection.select(contact).await?;
            console.selection.mark_replied().await?;
            console.selection.clear();
            print_contacts(console);
        }
        Command::Contacts(ContactCommand::Delete { id, .. }) => {
            console.mutations.delete(&id).await?;
            print_contacts(console);
        }
    }
    Ok(())
}

/// 控制器已經通知過失敗，這裡只轉成結束碼
fn check_fetch(outcome: FetchOutcome, resource: ResourceKind) -> Result<(), ConsoleError> {
    match outcome {
        FetchOutcome::Unauthorized => {
            println!("Admin login required");
            Err(ConsoleError::Unauthorized)
        }
        FetchOutcome::Failed => Err(ConsoleError::request_failed(
            resource,
            Operation::List,
            "see log for details",
        )),
        FetchOutcome::Committed | FetchOutcome::Stale | FetchOutcome::Unchanged => Ok(()),
    }
}

async fn load_contact(console: &AdminConsole, id: &str) -> Result<Contact, ConsoleError> {
    check_fetch(console.contacts.refresh().await, ResourceKind::Contacts)?;
    console.contacts.find(id).ok_or_else(|| ConsoleError::NotFound {
        resource: ResourceKind::Contacts,
        id: id.to_string(),
    })
}

fn print_contacts(console: &AdminConsole) {
    let view = console.contacts.snapshot();
    if view.access == AccessState::AuthorizationRequired {
        println!("Admin login required");
        return;
    }

    println!(
        "Total: {}  Unread: {}  Read: {}  Replied: {}",
        view.counts.total, view.counts.unread, view.counts.read, view.counts.replied
    );
    if view.contacts.is_empty() {
        println!("No messages found");
        return;
    }
    for contact in &view.contacts {
        println!(
            "{:<26} {:<8} {:<24} {} <{}>  {}",
            contact.id,
            contact.status.as_str(),
            contact.created_at.format("%Y-%m-%d %H:%M").to_string(),
            contact.name,
            contact.email,
            contact.subject
        );
    }
}

fn print_detail(contact: &Contact) {
    println!("{}", contact.subject);
    println!("From: {} ({})", contact.name, contact.email);
    println!("Status: {}", contact.status);
    println!();
    println!("{}", contact.message);
}

fn print_inventory(console: &AdminConsole) {
    let view = console.inventory.snapshot();
    println!(
        "Total Products: {}  Low Stock: {}  Out of Stock: {}  In Stock: {}",
        view.stats.total_products,
        view.stats.low_stock,
        view.stats.out_of_stock,
        view.stats.in_stock
    );
    if view.low_stock_items.is_empty() {
        println!("No low stock products");
        return;
    }
    for (item, level) in view.classified_alerts() {
        println!(
            "{:<32} {:>5} units left (threshold {}) [{}]",
            item.name, item.stock, item.threshold, level
        );
    }
}
