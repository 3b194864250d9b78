pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod media;
pub mod store;
pub mod types;
pub mod viewer;
pub mod workflow;

// Re-export commonly used types
pub use config::Config;
pub use error::{AuditError, ProbeResult};
pub use workflow::launch;
