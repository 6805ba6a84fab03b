//! Symbolic link handling options

use serde::{Deserialize, Serialize};

/// Option controlling how a trailing symbolic link is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOption {
  /// Operate on the link target (the default when no option is given)
  FollowLinks,
  /// Operate on the link itself
  NoFollowLinks,
}

/// Reduce a set of link options to a single "follow symbolic links" decision.
///
/// Links are followed unless `NoFollowLinks` appears anywhere in `options`.
/// Order and repetition do not matter.
pub fn follow_links(options: &[LinkOption]) -> bool {
  !options.contains(&LinkOption::NoFollowLinks)
}
