//! blockpulse - terminal market analytics dashboard library.

pub mod api;
pub mod config;
pub mod display;
pub mod fetch;
pub mod forecast;
pub mod panels;
pub mod sections;
pub mod staking;
pub mod tokens;

pub use api::{ApiClient, RequestDescriptor};
pub use config::Config;
pub use fetch::{FetchController, FetchError, FetchState};
pub use sections::{Section, SectionTracker};
pub use staking::{LedgerError, StakingLedger};
