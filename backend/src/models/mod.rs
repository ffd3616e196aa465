pub mod estate;

pub use estate::*;
