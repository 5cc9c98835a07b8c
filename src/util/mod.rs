pub mod parse;
pub mod string_id;
pub mod timeout;
