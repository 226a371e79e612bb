// Items most notebooks need in scope.
pub use crate::widgets;

pub use crate::cards::{with_padding, CardContext, DEFAULT_CARD_PADDING};
pub use crate::dataflow::ComputedState;
pub use crate::notebook;
pub use crate::state::StateId;
pub use crate::{NotebookConfig, NotebookCtx};
