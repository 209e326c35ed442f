//! # Evidence-Chain Test Suite
//!
//! Cross-crate tests that drive whole sessions through the runtime and then
//! hand the archived evidence to the verifier.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── fixtures.rs        # Multi-symbol trading session, session runner
//! │   └── integration/
//! │       ├── end_to_end.rs  # Pipeline → archive → verifier
//! │       ├── tamper.rs      # Deleted, reordered and altered evidence
//! │       └── telemetry.rs   # Metrics exported after a session
//! └── benches/
//!     └── pipeline_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ec-tests
//!
//! # By category
//! cargo test -p ec-tests integration::end_to_end::
//! cargo test -p ec-tests integration::tamper::
//!
//! # Benchmarks
//! cargo bench -p ec-tests
//! ```

pub mod fixtures;
pub mod integration;
