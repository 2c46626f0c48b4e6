//! Provider resolution from connection labels

use std::cmp::Ordering;

use connscope_types::ProviderConnection;

use crate::registry::ProviderRegistry;

/// Prefix of the label carrying the provider identifier
pub const PROVIDER_LABEL_PREFIX: &str = "cluster.open-cluster-management.io/provider=";

/// Extract the provider identifier from a label set.
///
/// Returns the text after the prefix of the first matching label, or `""`.
pub fn provider_id<S: AsRef<str>>(labels: &[S]) -> &str {
    labels
        .iter()
        .find_map(|label| label.as_ref().strip_prefix(PROVIDER_LABEL_PREFIX))
        .unwrap_or("")
}

/// Display name of the provider a label set points at
pub fn provider_name<'r, S: AsRef<str>>(labels: &[S], registry: &'r ProviderRegistry) -> &'r str {
    &registry.resolve(provider_id(labels)).name
}

/// Compare two connections by resolved provider display name
pub fn compare_by_provider(
    a: &ProviderConnection,
    b: &ProviderConnection,
    registry: &ProviderRegistry,
) -> Ordering {
    provider_name(&a.labels, registry).cmp(provider_name(&b.labels, registry))
}
