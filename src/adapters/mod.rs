// Adapters layer: concrete implementations of the domain ports (HTTP gateway, notifier, prompts).

pub mod http;
pub mod notify;

pub use http::HttpGateway;
pub use notify::{AssumeYes, ConsoleNotifier, StdinPrompt};
