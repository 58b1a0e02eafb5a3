mod key_list;

pub use key_list::{key_match, KeyBinding, KeysList};
