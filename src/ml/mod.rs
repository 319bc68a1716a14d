//! Lightweight ML inference (deploy-safe, CPU-only).
//!
//! The trained pipeline is consumed from a JSON artifact so the service runs
//! without a Python toolchain in production.

pub mod kernel;
pub mod pipeline;

pub use kernel::Kernel;
pub use pipeline::{StandardScaler, SvmClassifier, SvmPipeline};
