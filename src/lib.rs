pub mod stream;
pub mod ws;
