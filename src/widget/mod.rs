pub mod candidate;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod lookup;
pub mod navigator;
#[allow(clippy::module_inception)]
pub mod widget;

pub use candidate::{Candidate, CandidateId};
pub use config::AutocompleteConfig;
pub use controller::{LookupState, SuggestionController};
pub use debounce::Debouncer;
pub use lookup::{LookupError, LookupExecutor, LookupSource};
pub use navigator::ListNavigator;
pub use widget::{AutocompleteInput, InteractionResult, WidgetAction, WidgetBounds};
