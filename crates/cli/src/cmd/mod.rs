mod get;
mod set;
mod views;
mod xattr;

pub use get::cmd_get;
pub use set::cmd_set;
pub use views::cmd_views;
pub use xattr::{cmd_xattr_get, cmd_xattr_list, cmd_xattr_rm, cmd_xattr_set};
