//! Output generation for extracted articles.
//!
//! # Submodules
//!
//! - [`json`]: Writes each [`ArticleRecord`](crate::models::ArticleRecord) to
//!   its own JSON file
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── storm-hits-coast.json
//! └── cabinet-approves-new-rail-corridor.json
//! ```

pub mod json;
