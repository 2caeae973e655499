//! Reply synthesis for the companion avatar.
//!
//! The router asks a [`ReplyGenerator`] for the assistant's content given
//! the session history. Swapping in a real speech or LLM backend only means
//! providing another implementation.

pub mod echo;
pub mod generator;
