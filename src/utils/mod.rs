pub mod flash;
pub mod username_index;
