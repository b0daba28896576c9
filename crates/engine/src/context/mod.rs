//! Bounded context assembly.
//!
//! Turns the documents of a session into the single string the model sees.
//!
//! | Mode | Shape | Used by |
//! |------|-------|---------|
//! | Multi | `--- START FILE: name ---` / `--- END FILE ---` around each document | multi-document view |
//! | Single | raw text, no markers | single-document view |
//!
//! Every assembled string is hard-cut at a character budget. The cut is not
//! sentence-aware, and prompts say so to the model.

pub mod assembler;

pub use assembler::{
    AssembledContext, ContextAssembler, ContextBudget, ContextMode, render_section, truncate,
};
