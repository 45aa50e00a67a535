//! Message formatting utilities for client display.

use chrono::{DateTime, Local};

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the banner shown once the document id is known
    pub fn format_opened(doc_id: &str) -> String {
        format!(
            "\n============================================================\n\
             Document ID: {}\n\
             Type lines to append them, /help for commands.\n\
             ============================================================\n",
            doc_id
        )
    }

    /// Format the content received right after joining
    pub fn format_loaded(content: &str) -> String {
        if content.is_empty() {
            "\n(empty document)\n".to_string()
        } else {
            format!("\n{}\n", Self::format_document(content))
        }
    }

    /// Format the whole document between rules
    pub fn format_document(content: &str) -> String {
        format!("{}\n{}\n{}", RULE, content, RULE)
    }

    /// Format the notice shown when a rejoin keeps unsaved local edits
    pub fn format_kept_local_edits() -> String {
        "\n(keeping unsaved local edits)\n".to_string()
    }

    /// Format an active-users notification
    pub fn format_active_users(count: usize) -> String {
        let label = if count == 1 { "user" } else { "users" };
        format!("\n* {} active {}\n", count, label)
    }

    /// Format content relayed from another editor
    pub fn format_remote_changes(content: &str) -> String {
        format!("\n← remote changes\n{}\n", Self::format_document(content))
    }

    /// Format a save acknowledgement
    ///
    /// # Arguments
    ///
    /// * `saved_at` - RFC 3339 timestamp sent by the server
    pub fn format_saved(saved_at: &str) -> String {
        match DateTime::parse_from_rfc3339(saved_at) {
            Ok(ts) => format!(
                "\n✓ saved at {}\n",
                ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            ),
            Err(_) => format!("\n✓ saved at {}\n", saved_at),
        }
    }

    /// Format word and character counts
    pub fn format_stats(words: usize, chars: usize) -> String {
        format!("{} words, {} characters\n", words, chars)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    pub fn format_help() -> String {
        "Commands:\n  \
         /save    save now\n  \
         /show    print the document\n  \
         /stats   word and character count\n  \
         /clear   empty the document\n  \
         /export  write the document to <id>.txt\n  \
         /quit    exit\n\
         Any other line is appended to the document (start with // to append a line beginning with /).\n"
            .to_string()
    }
}
