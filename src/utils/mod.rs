pub mod crypto;
pub mod form;
pub mod time;
pub mod token;
