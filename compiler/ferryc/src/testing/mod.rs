//! Testing utilities for the ferry driver.
//!
//! - **mocks**: stand-ins for the external build and unload collaborators
//!
//! # Usage
//!
//! ```ignore
//! use ferryc::testing::mocks::{MockToolchain, MockUnloader};
//!
//! let toolchain = MockToolchain::with_diagnostics("");
//! let builds = toolchain.builds();
//! let session = Session::new(config).with_toolchain(toolchain);
//! ```

pub mod mocks;

pub use mocks::{MockToolchain, MockUnloader};
