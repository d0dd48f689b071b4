//! # rulecheck-core
//!
//! Request, prompt, and verdict shaping for rulecheck.
//!
//! This crate owns everything about a check that does not need the
//! network: the inbound request shape, the fixed four-message prompt
//! sent to the model, and the strict parsing of the answer.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: [`check_prompt`] always produces the same messages for the same inputs
//! 2. **No I/O**: nothing in this crate touches the network or filesystem
//! 3. **Strict parsing**: model output is validated field by field before it becomes a [`Verdict`]
//!
//! ## Example
//!
//! ```rust
//! use rulecheck_core::{check_prompt, Verdict};
//!
//! let messages = check_prompt("Must contain a greeting", "Hello world");
//! assert_eq!(messages.len(), 4);
//!
//! let verdict = Verdict::from_model_output(r#"{"pass": true}"#).unwrap();
//! assert!(verdict.is_pass());
//! ```

pub mod prompt;
pub mod types;
pub mod verdict;

// Re-export main types at crate root
pub use prompt::{check_prompt, LINTER_SYSTEM_PROMPT, RESPONSE_FORMAT_PROMPT};
pub use types::{ChatMessage, CheckRequest, Role};
pub use verdict::{Verdict, VerdictError};
