pub mod input;
pub mod terminal;
pub mod ui;
pub mod widget;

pub use input::text_input::TextInput;
pub use terminal::Terminal;
pub use ui::highlight;
pub use ui::span;
pub use ui::style;
pub use widget::candidate::{Candidate, CandidateId};
pub use widget::config::AutocompleteConfig;
pub use widget::controller::{LOOKUP_ERROR_MESSAGE, LookupState, SuggestionController};
pub use widget::debounce::Debouncer;
pub use widget::lookup::{LookupError, LookupSource};
pub use widget::navigator::ListNavigator;
pub use widget::widget::{
    AutocompleteInput, DrawOutput, InteractionResult, WidgetAction, WidgetBounds,
};
