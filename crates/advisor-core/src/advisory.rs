//! Advisory endpoint boundary and the prompts sent across it.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{Product, ProductId};
use crate::conversation::Message;
use crate::error::Result;

/// Directive placed at the head of every conversation log.
pub const SYSTEM_DIRECTIVE: &str = "You are a helpful beauty routine advisor. \
Stay on skincare, haircare, makeup, and fragrance. \
Prioritize the user's selected products first. If selections are unsuitable, offer close alternatives from the same brands. \
Explain routines step-by-step (AM/PM when relevant), short but specific. Avoid medical claims.";

/// Reply substituted when the endpoint answers successfully without a usable `reply`.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process that.";

const ROUTINE_INSTRUCTION: &str = "Use ONLY these selected products if possible. \
If a crucial routine step is missing, suggest a close alternative from the same brand:";

/// A remote service that turns a conversation into the next assistant message.
///
/// Implementations must not mutate the conversation; the caller appends the
/// returned message itself.
#[async_trait]
pub trait AdvisoryBackend: Send + Sync {
    /// Sends the full message history and returns the assistant reply.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the endpoint is not configured (no request is made)
    /// - `Remote` for a non-success HTTP status
    /// - `Network` if no response was received
    ///
    /// A success status with an unusable body is not an error: the fallback
    /// reply is returned instead.
    async fn request_reply(&self, messages: &[Message]) -> Result<Message>;
}

/// The product fields embedded in a routine request.
#[derive(Debug, Serialize)]
struct RoutineProduct<'a> {
    id: &'a ProductId,
    brand: &'a str,
    name: &'a str,
    category: &'a str,
    description: &'a str,
}

/// Builds the synthesized user message that asks for a routine built from
/// `products`.
pub fn routine_request(products: &[Arc<Product>]) -> Result<Message> {
    let summary: Vec<RoutineProduct<'_>> = products
        .iter()
        .map(|product| RoutineProduct {
            id: &product.id,
            brand: &product.brand,
            name: &product.name,
            category: &product.category,
            description: &product.description,
        })
        .collect();

    let embedded = serde_json::to_string_pretty(&summary)?;
    Ok(Message::user(format!("{ROUTINE_INSTRUCTION}\n\n{embedded}")))
}
