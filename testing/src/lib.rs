//! Shared test fixtures for the ksail workspace.
//!
//! Provides:
//! - [`TempProject`]: a scratch project tree on disk
//! - [`CwdGuard`]: switches the process working directory and restores it
//! - Canned YAML documents for every supported distribution
//!
//! Tests that use [`CwdGuard`] change process-wide state and must run under
//! `serial_test::serial`.

mod fixtures;

pub use fixtures::*;
