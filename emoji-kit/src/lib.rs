//! Emoji Kit - data generation and browsing logic for the emoji picker
//!
//! Two halves share the `EmojiTable` artifact:
//! - generation: `registry` + `annotations` -> `table` -> `artifact`
//! - browsing: `search`/`ranking` over the table, `recents` and `clipboard`
//!   for copy actions, `view` for section highlighting

pub mod annotations;
pub mod artifact;
pub mod clipboard;
pub mod feedback;
pub mod generate;
pub mod interface;
pub mod models;
pub mod ranking;
pub mod recents;
pub mod registry;
pub mod search;
pub mod storage;
pub mod table;
pub mod view;

pub use interface::*;
pub use generate::{generate, AnnotationInputs};
pub use registry::ParseOptions;
