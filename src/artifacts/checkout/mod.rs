//! Working directory checkout
//!
//! Checkout, reset and merge plan every change to the working directory up
//! front, refuse the plan when it would clobber an untracked file, and only
//! then touch the disk.

pub mod migration;
