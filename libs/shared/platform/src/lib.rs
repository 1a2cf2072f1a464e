pub mod client;

pub use client::{ApiEnvelope, PlatformClient};
