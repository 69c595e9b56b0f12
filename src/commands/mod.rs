pub mod check;
pub mod discover;
pub mod read;
pub mod spec;
