pub mod text_edit;
pub mod text_input;

pub use text_input::TextInput;
