pub mod terminal;

pub use terminal::{sanitize, single_line};
