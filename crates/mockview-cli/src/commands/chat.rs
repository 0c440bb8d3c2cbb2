//! The `mockview chat` command.

use anyhow::Result;

use mockview_core::chat::chat_response;
use mockview_core::model::Domain;

pub fn execute(message: &str, question: &str, domain: &str) -> Result<()> {
    anyhow::ensure!(!message.trim().is_empty(), "message must not be empty");
    println!("{}", chat_response(message, question, Domain::resolve(domain)));
    Ok(())
}
