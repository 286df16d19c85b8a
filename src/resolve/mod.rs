//! Resolvers turning raw inputs into validated run settings
//!
//! - [`os`]: `auto` or explicit OS to a concrete [`OsType`](crate::domain::OsType)
//! - [`kiro_dir`]: validation of the root output directory
//! - [`layout`]: per-agent directory layout with config overrides

pub mod kiro_dir;
pub mod layout;
pub mod os;

pub use kiro_dir::{DEFAULT_KIRO_DIR, resolve_kiro_dir};
pub use layout::{AgentLayout, AgentLayoutOverride, resolve_agent_layout};
pub use os::resolve_os;
