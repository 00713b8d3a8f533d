//! Open form state shared by the pages.

use scape_core::RecordId;

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

/// An open form and its edit target.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor<F> {
    pub mode: FormMode,
    pub form: F,
}

impl<F: Default> Editor<F> {
    #[must_use]
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            form: F::default(),
        }
    }
}

impl<F> Editor<F> {
    #[must_use]
    pub const fn edit(id: RecordId, form: F) -> Self {
        Self {
            mode: FormMode::Edit(id),
            form,
        }
    }
}
