//! Kubernetes client for connscope
//!
//! This crate provides Kubernetes API integration for reading kubeconfig
//! contexts and listing or deleting provider connection Secrets.

mod client;

pub use client::{DEFAULT_CONNECTION_SELECTOR, KubeClient};

// Re-export types that are used in our public API
pub use connscope_types::{ConnectionRef, ContextInfo, ProviderConnection};
