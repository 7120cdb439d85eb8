use crate::config::ProvisionerConfig;

use super::Result;

/// Decides which tables are managed and under what configuration.
///
/// Scaling policies take this as an injected capability, so another
/// strategy (tag based, say) can replace the whitelist without touching them.
pub trait TableResolver: Send + Sync {
    /// Every managed table name, in declaration order, without duplicates.
    fn resolve_whitelist(&self) -> Vec<String>;

    /// The configuration governing `table_name`.
    fn resolve_config(&self, table_name: &str) -> Result<&ProvisionerConfig>;

    /// Keeps the candidates that are managed, preserving their order.
    ///
    /// Every dropped candidate gets a diagnostic; dropping is not an error.
    fn filter_managed(&self, candidates: &[String]) -> Vec<String> {
        let whitelist = self.resolve_whitelist();
        candidates
            .iter()
            .filter(|name| {
                if whitelist.contains(name) {
                    true
                } else {
                    tracing::info!(table = %name, "Ignoring table because it is not in the whitelist");
                    false
                }
            })
            .cloned()
            .collect()
    }
}
