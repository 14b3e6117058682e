//! kmgen: synthesize KityMinder request-document templates
//!
//! One invocation builds a configurable section tree under a titled root,
//! writes it as pretty-printed JSON into a date-partitioned flow directory
//! (or an explicit path), and optionally hands the file to an editor.

pub mod cli;
pub mod config;
pub mod editor;
pub mod errors;
pub mod exitcode;
pub mod flow;
pub mod id;
pub mod sanitize;
pub mod template;
pub mod util;
