//! UI utilities for the client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

/// Prompt shown before each input line
pub fn prompt(doc_id: &str) -> String {
    let short: String = doc_id.chars().take(8).collect();
    format!("{}> ", short)
}

/// Redisplay the prompt after printing a notification
pub fn redisplay_prompt(doc_id: &str) {
    print!("{}", prompt(doc_id));
    std::io::stdout().flush().ok();
}

/// Read lines on a dedicated thread (rustyline is synchronous)
///
/// The receiver yields `None` once the user presses Ctrl+C or Ctrl+D.
/// The thread outlives reconnects, so it is spawned once per client run.
pub fn spawn_readline(doc_id: &str) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = prompt(doc_id);

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str()).ok();
                    if input_tx.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
