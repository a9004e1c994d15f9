pub mod date;
pub mod text;
pub mod validate;
