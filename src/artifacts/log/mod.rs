//! Commit history traversal
//!
//! - `rev_list`: lazy first-parent walk used by `log`

pub mod rev_list;
