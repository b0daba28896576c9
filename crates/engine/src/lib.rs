//! # AuditFlow Engine
//!
//! Everything between extracted text and the model call:
//!
//! - [`context`]: bounded context assembly with document markers
//! - [`prompt`]: deterministic payloads for the five task kinds
//! - [`Analyst`]: the call site that turns provider results into [`Outcome`]s
//! - [`session`]: document views, the note keeper, smart replace
//!
//! ```no_run
//! # async fn demo() -> auditflow_core::Result<()> {
//! use auditflow_config::AppConfig;
//! use auditflow_engine::{Analyst, ContextMode, DocumentSession};
//! use auditflow_extract::FileExtractor;
//! use auditflow_core::FileUpload;
//!
//! let config = AppConfig::load().map_err(|e| auditflow_core::Error::Config { message: e.to_string() })?;
//! let analyst = Analyst::from_config(&config);
//! let mut session = DocumentSession::from_config(ContextMode::Multi, &config);
//!
//! let files = vec![FileUpload::new("a.txt", "text/plain", b"Alpha".to_vec())];
//! session.upload(&FileExtractor::new(), &files).await?;
//! if let Some(report) = session.generate_report(&analyst).await? {
//!     println!("{}", report.display_text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyst;
pub mod context;
pub mod outcome;
pub mod prompt;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use analyst::Analyst;
pub use context::{AssembledContext, ContextAssembler, ContextBudget, ContextMode};
pub use outcome::Outcome;
pub use prompt::{ChatPayload, MagicKind, PromptBuilder, TaskKind, TextPayload};
pub use session::{DocumentSession, NoteSession, SmartReplace};
