// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit module: fields, templates and the interactive builder.

mod builder;
mod fields;
mod preview;
pub mod template;

pub use builder::CommitBuilder;
pub use fields::CommitFields;
pub use preview::CommitPreview;
pub use template::{render, Placeholder, Template};
