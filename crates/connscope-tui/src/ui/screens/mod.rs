//! Screen implementations

mod connections;
mod context_select;

pub use connections::ConnectionsScreen;
pub use context_select::ContextSelectScreen;
