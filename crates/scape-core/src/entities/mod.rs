//! Entity structs for the three backend collections.
//!
//! Each entity maps to one backend table (`smells`, `articles`,
//! `smell_library`). Alongside each entity live its create payload
//! (`*Draft`, produced by form validation) and its partial update
//! (`*Patch`, only set fields are serialized).

mod article;
mod report;
mod scent;

pub use article::{Article, ArticleDraft, ArticlePatch};
pub use report::{Report, ReportDraft, ReportPatch};
pub use scent::{Scent, ScentDraft, ScentPatch};
