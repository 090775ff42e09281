use crate::domain::ports::{ConfirmationPrompt, Notifier};
use std::io::{self, BufRead, Write};

/// 把通知寫到 stderr，同時留下日誌
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        tracing::info!("✅ {}", message);
        eprintln!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        tracing::warn!("❌ {}", message);
        eprintln!("❌ {}", message);
    }
}

/// 從標準輸入讀取 y/N
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    fn read_answer(question: &str) -> io::Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{} [y/N] ", question)?;
        stderr.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

impl ConfirmationPrompt for StdinPrompt {
    fn confirm(&self, question: &str) -> bool {
        match Self::read_answer(question) {
            Ok(answer) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!("Could not read confirmation, treating as no: {}", e);
                false
            }
        }
    }
}

/// --yes 時使用
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl ConfirmationPrompt for AssumeYes {
    fn confirm(&self, question: &str) -> bool {
        tracing::debug!("Auto-confirming: {}", question);
        true
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
