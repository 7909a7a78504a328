mod core;

pub use core::{cmd_categories, cmd_list, cmd_share};
