pub mod highlight;
pub mod span;
pub mod style;
