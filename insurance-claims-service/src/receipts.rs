//! `receipt` console verb: attach and detach receipt handles on the draft.

use async_trait::async_trait;
use tracing::debug;
use wizard_flow::{CommandExtension, Context};

use crate::models::Receipt;
use crate::tasks::session_keys;

const USAGE: &str = "usage: receipt add <name> <bytes> | receipt remove <number>";

pub struct ReceiptCommands;

impl ReceiptCommands {
    async fn add(&self, args: &[String], context: &Context) -> String {
        let Some((size, name)) = args.split_last() else {
            return USAGE.to_string();
        };
        let Ok(size) = size.parse::<u64>() else {
            return USAGE.to_string();
        };
        if name.is_empty() {
            return USAGE.to_string();
        }

        let receipt = Receipt {
            name: name.join(" "),
            size,
        };
        let mut receipts: Vec<Receipt> = context.get(session_keys::RECEIPTS).await.unwrap_or_default();
        let message = format!("Attached {} ({})", receipt.name, receipt.size_label());
        receipts.push(receipt);
        debug!(count = receipts.len(), "receipt attached");
        context.set(session_keys::RECEIPTS, receipts).await;
        message
    }

    async fn remove(&self, args: &[String], context: &Context) -> String {
        let mut receipts: Vec<Receipt> = context.get(session_keys::RECEIPTS).await.unwrap_or_default();
        let index = match args {
            [number] => number.parse::<usize>().ok().filter(|n| (1..=receipts.len()).contains(n)),
            _ => None,
        };
        let Some(index) = index else {
            return format!("No receipt with that number. {USAGE}");
        };

        let removed = receipts.remove(index - 1);
        debug!(count = receipts.len(), "receipt removed");
        context.set(session_keys::RECEIPTS, receipts).await;
        format!("Removed {}", removed.name)
    }
}

#[async_trait]
impl CommandExtension for ReceiptCommands {
    async fn handle(&self, verb: &str, args: &[String], context: &Context) -> Option<String> {
        if verb != "receipt" {
            return None;
        }
        Some(match args.split_first() {
            Some((action, rest)) if action == "add" => self.add(rest, context).await,
            Some((action, rest)) if action == "remove" => self.remove(rest, context).await,
            _ => USAGE.to_string(),
        })
    }

    fn help(&self) -> &'static str {
        "  receipt add <name> <bytes>  attach a receipt to the claim\n  receipt remove <number>     detach a receipt"
    }
}
