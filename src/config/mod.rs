pub mod context_overrides;
pub mod defaults;
pub mod loader;
pub mod types;

pub use context_overrides::{ContextOverride, ContextOverrideError, ContextOverrideManager};
pub use loader::ConfigLoader;
pub use types::*;
