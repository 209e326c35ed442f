//! Integration tests spanning the runtime, the archive format and the
//! verifier.

pub mod end_to_end;
pub mod tamper;
pub mod telemetry;
