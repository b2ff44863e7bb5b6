//! Augment Common - Shared utilities for the augmentation workspace
//!
//! - **Initialization**: [`init_tracing`] for consistent log setup in every binary
//! - **Text**: char-safe truncation, markup stripping and keyword matching
//!
//! # Example
//!
//! ```rust,ignore
//! use augment_common::{init_tracing, truncate_with_ellipsis};
//!
//! init_tracing("search_augment")?;
//! let short = truncate_with_ellipsis(&long_text, 500);
//! ```

pub mod init;
pub mod text;

pub use init::init_tracing;
pub use text::{contains_any, strip_tags, truncate_with_ellipsis, ELLIPSIS};
