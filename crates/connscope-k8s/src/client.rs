//! Kubernetes client for connscope

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Secret;
use kube::Api;
use kube::api::{DeleteParams, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::debug;

use connscope_types::{ConnectionRef, ContextInfo, ProviderConnection};

/// Label selector matching the Secrets the console treats as provider connections
pub const DEFAULT_CONNECTION_SELECTOR: &str = "cluster.open-cluster-management.io/cloudconnection";

/// Kubernetes client wrapper
pub struct KubeClient {
    kubeconfig: Kubeconfig,
    current_context: Option<String>,
}

impl KubeClient {
    /// Create a new KubeClient by loading the kubeconfig
    pub fn new() -> Result<Self> {
        let kubeconfig =
            Kubeconfig::read().context("Failed to read kubeconfig. Is kubectl configured?")?;

        Ok(Self::from_kubeconfig(kubeconfig))
    }

    pub fn from_kubeconfig(kubeconfig: Kubeconfig) -> Self {
        let current_context = kubeconfig.current_context.clone();

        Self {
            kubeconfig,
            current_context,
        }
    }

    /// Get all available contexts from kubeconfig
    pub fn get_contexts(&self) -> Vec<ContextInfo> {
        self.kubeconfig
            .contexts
            .iter()
            .map(|ctx| {
                let context = ctx.context.as_ref();
                ContextInfo::new(
                    ctx.name.clone(),
                    context.map(|c| c.cluster.clone()).unwrap_or_default(),
                    context.and_then(|c| c.user.clone()).unwrap_or_default(),
                    context.and_then(|c| c.namespace.clone()),
                    Some(&ctx.name) == self.current_context.as_ref(),
                )
            })
            .collect()
    }

    /// Get the current context name
    pub fn current_context(&self) -> Option<&str> {
        self.current_context.as_deref()
    }

    /// Create a kube::Client for a specific context
    pub async fn client_for_context(&self, context_name: &str) -> Result<kube::Client> {
        let config = kube::Config::from_custom_kubeconfig(
            self.kubeconfig.clone(),
            &KubeConfigOptions {
                context: Some(context_name.to_string()),
                ..Default::default()
            },
        )
        .await
        .context(format!(
            "Failed to create config for context: {}",
            context_name
        ))?;

        kube::Client::try_from(config).context(format!(
            "Failed to create client for context: {}",
            context_name
        ))
    }

    /// List provider connection Secrets, cluster-wide when no namespace is given
    pub async fn list_provider_connections(
        client: &kube::Client,
        namespace: Option<&str>,
        selector: &str,
    ) -> Result<Vec<ProviderConnection>> {
        let secrets: Api<Secret> = match namespace {
            Some(ns) => Api::namespaced(client.clone(), ns),
            None => Api::all(client.clone()),
        };

        let list = secrets
            .list(&ListParams::default().labels(selector))
            .await
            .context(match namespace {
                Some(ns) => format!("Failed to list provider connections in {}", ns),
                None => "Failed to list provider connections".to_string(),
            })?;

        debug!(count = list.items.len(), "listed provider connections");

        Ok(list
            .items
            .into_iter()
            .map(Self::secret_to_connection)
            .collect())
    }

    /// Delete a single provider connection Secret
    pub async fn delete_provider_connection(
        client: &kube::Client,
        target: &ConnectionRef,
    ) -> Result<()> {
        let secrets: Api<Secret> = Api::namespaced(client.clone(), &target.namespace);
        secrets
            .delete(&target.name, &DeleteParams::default())
            .await
            .context(format!(
                "Failed to delete provider connection '{}' in namespace '{}'",
                target.name, target.namespace
            ))?;

        debug!(%target, "deleted provider connection");
        Ok(())
    }

    /// Convert a k8s Secret to a ProviderConnection
    fn secret_to_connection(secret: Secret) -> ProviderConnection {
        let meta = secret.metadata;
        let labels = meta
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>();

        ProviderConnection::new(
            meta.uid.unwrap_or_default(),
            meta.name.unwrap_or_default(),
            meta.namespace.unwrap_or_default(),
        )
        .with_labels(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    #[test]
    fn test_secret_to_connection_flattens_labels() {
        let mut labels = BTreeMap::new();
        labels.insert(
            "cluster.open-cluster-management.io/provider".to_string(),
            "aws".to_string(),
        );
        labels.insert("team".to_string(), "infra".to_string());

        let secret = Secret {
            metadata: ObjectMeta {
                name: Some("aws-east".to_string()),
                namespace: Some("ns1".to_string()),
                uid: Some("0d5c".to_string()),
                labels: Some(labels),
                ..Default::default()
            },
            ..Default::default()
        };

        let conn = KubeClient::secret_to_connection(secret);
        assert_eq!(conn.uid, "0d5c");
        assert_eq!(conn.name, "aws-east");
        assert_eq!(conn.namespace, "ns1");
        assert!(conn
            .labels
            .contains(&"cluster.open-cluster-management.io/provider=aws".to_string()));
        assert!(conn.labels.contains(&"team=infra".to_string()));
    }

    #[test]
    fn test_secret_without_labels() {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some("bare".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let conn = KubeClient::secret_to_connection(secret);
        assert!(conn.labels.is_empty());
        assert_eq!(conn.namespace, "");
    }

    #[test]
    fn test_contexts_mark_current() {
        let kubeconfig = Kubeconfig::from_yaml(
            r#"
apiVersion: v1
kind: Config
current-context: hub
contexts:
  - name: hub
    context:
      cluster: hub-cluster
      user: admin
      namespace: open-cluster-management
  - name: spoke
    context:
      cluster: spoke-cluster
      user: admin
"#,
        )
        .unwrap();

        let client = KubeClient::from_kubeconfig(kubeconfig);
        let contexts = client.get_contexts();
        assert_eq!(contexts.len(), 2);
        assert!(contexts[0].is_current);
        assert_eq!(contexts[0].cluster, "hub-cluster");
        assert!(!contexts[1].is_current);
        assert_eq!(client.current_context(), Some("hub"));
    }
}
