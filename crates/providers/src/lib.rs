//! HTTP clients for the upstream services the gateway fronts: the two
//! interchangeable video generation providers, the ElevenLabs TTS API,
//! and the resolution poller that turns a job identifier into a playable
//! asset URL.

pub mod config;
pub mod eleven;
pub mod error;
pub mod fal;
pub mod kie;
pub mod poller;
pub mod provider;

mod submission;

pub use eleven::{ElevenClient, ElevenConfig};
pub use error::ProviderError;
pub use fal::{FalClient, FalConfig};
pub use kie::{KieClient, KieConfig};
pub use poller::PollConfig;
pub use provider::{ProviderKind, VideoProvider};
