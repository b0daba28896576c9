//! Session orchestration.
//!
//! A session owns its working content and its [`ConversationLog`]; the
//! [`Analyst`] is borrowed per request. Every request method takes
//! `&mut self`, so one log can never have two requests in flight.
//!
//! Request methods share one shape:
//! - `Err(Error::CredentialMissing)` before anything else happens
//! - `Ok(None)` when there is nothing to do (blank query, no content)
//! - `Ok(Some(outcome))` once the model call resolved

pub mod document;
pub mod note;
pub mod replace;

pub use document::DocumentSession;
pub use note::NoteSession;
pub use replace::SmartReplace;

use crate::analyst::Analyst;
use crate::context::AssembledContext;
use crate::outcome::Outcome;
use auditflow_core::conversation::{ConversationLog, Role};
use tracing::debug;

/// One chat round against `context`.
///
/// The payload is built from the history before the query; the user turn
/// is appended before the call, the assistant turn only if the call
/// produced something to show as an answer.
async fn chat_round(
    analyst: &Analyst,
    log: &mut ConversationLog,
    context: &AssembledContext,
    query: &str,
) -> Outcome {
    let payload = analyst
        .builder()
        .chat(query, context, log.history(), analyst.config());
    log.append_turn(Role::User, query);

    let outcome = analyst.converse(payload).await;
    match &outcome {
        Outcome::Generated { text } => log.append_turn(Role::Assistant, text.clone()),
        Outcome::Empty { placeholder } => log.append_turn(Role::Assistant, placeholder.clone()),
        Outcome::Failed { .. } => {
            debug!(turns = log.len(), "Chat failed; no assistant turn appended");
        }
    }
    outcome
}
