//! Error types for the front-end.
//!
//! This module defines the errors raised while tokenizing and parsing:
//!
//! - An error structure carrying the source position of the failure
//! - Specific variants grouped into lexical, syntax, type and scope kinds
//! - Short names and suggestions for the driver's diagnostics
//!
//! Every error is fatal to the invocation that raised it.

pub mod errors;
