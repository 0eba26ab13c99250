//! Service Layer
//!
//! Application services that wrap the pure domain codec with limits,
//! metrics and logging.

pub mod codec_service;

pub use codec_service::SubscriptionCodecService;
