use std::collections::HashMap;

use connscope_types::ProviderDescriptor;

/// Key of the descriptor returned for identifiers the registry does not know
pub const UNKNOWN_PROVIDER_KEY: &str = "unknown";

/// Providers the console ships with, as (key, display name)
const BUILTIN_PROVIDERS: &[(&str, &str)] = &[
    ("aws", "Amazon Web Services"),
    ("gcp", "Google Cloud"),
    ("azr", "Microsoft Azure"),
    ("vmw", "VMware vSphere"),
    ("bmc", "Bare metal"),
    ("ost", "Red Hat OpenStack"),
    ("rhv", "Red Hat Virtualization"),
];

/// Immutable lookup from provider identifier to display name.
///
/// Lookup is total: unknown and empty identifiers resolve to the
/// `unknown` descriptor.
#[derive(Clone, Debug)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderDescriptor>,
    unknown: ProviderDescriptor,
}

impl ProviderRegistry {
    /// Registry with the built-in providers only
    pub fn builtin() -> Self {
        let providers = BUILTIN_PROVIDERS
            .iter()
            .map(|(key, name)| (key.to_string(), ProviderDescriptor::new(*key, *name)))
            .collect();

        Self {
            providers,
            unknown: ProviderDescriptor::new(UNKNOWN_PROVIDER_KEY, "Unknown"),
        }
    }

    /// Add or override entries; later entries win
    pub fn with_providers<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = ProviderDescriptor>,
    {
        for descriptor in extra {
            self.providers.insert(descriptor.key.clone(), descriptor);
        }
        self
    }

    /// Resolve an identifier to its descriptor
    pub fn resolve(&self, key: &str) -> &ProviderDescriptor {
        self.providers.get(key).unwrap_or(&self.unknown)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
