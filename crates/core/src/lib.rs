//! # AuditFlow Core
//!
//! Domain types, traits, and error definitions for the AuditFlow
//! document-intelligence engine. This crate has **no I/O**; it defines the
//! domain model that every other crate implements against.
//!
//! ## Design Philosophy
//!
//! Both external collaborators are traits here:
//! - [`Provider`] is the model invocation boundary (hosted LLM).
//! - [`TextExtractor`] turns an uploaded file into plain text.
//!
//! Implementations live in `auditflow-providers` and `auditflow-extract`,
//! so the engine can be tested against scripted stand-ins.

pub mod analysis;
pub mod conversation;
pub mod document;
pub mod error;
pub mod extract;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use analysis::{AnalysisConfig, Language, ModelInfo, SUPPORTED_MODELS};
pub use conversation::{CapacityPolicy, ConversationLog, ConversationState, ConversationTurn, Role};
pub use document::{Document, DocumentCollection, DocumentId, MediaType};
pub use error::{Error, ExtractionError, ProviderError, Result};
pub use extract::{FileUpload, TextExtractor};
pub use provider::{PromptMessage, Provider, ProviderRequest, ProviderResponse, Usage};
