//! Hook pipeline
//!
//! Every loaded record passes through two phases before it reaches the
//! caller: the fixed internal phase writes `path` and `url` from the injected
//! [`EnrichmentConfig`], then registered hooks run in order and may mutate
//! the record freely, including `extension_data`. A failing hook aborts the
//! remaining hooks; earlier hooks' writes are not rolled back.

use hostmux_shared::{DomainError, DomainRecord, DomainResult};

use crate::config::EnrichmentConfig;

/// A registered extension point, invoked once per domain load.
///
/// `id` names the hook in failure reports; it does not have to be unique.
pub trait DomainHook: Send + Sync {
    fn id(&self) -> &str;

    /// Observe or mutate a freshly loaded record. The internal phase has
    /// already run, so `path` and `url` are set. Returning an error aborts
    /// the load.
    fn on_domain_load(&self, domain: &mut DomainRecord) -> anyhow::Result<()>;
}

/// Closure adapter so simple hooks don't need a named type
struct FnHook<F> {
    id: String,
    f: F,
}

impl<F> DomainHook for FnHook<F>
where
    F: Fn(&mut DomainRecord) -> anyhow::Result<()> + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn on_domain_load(&self, domain: &mut DomainRecord) -> anyhow::Result<()> {
        (self.f)(domain)
    }
}

struct Registration {
    hook: Box<dyn DomainHook>,
    priority: i32,
}

/// Ordered two-phase pipeline run over every loaded record
pub struct HookPipeline {
    enrichment: EnrichmentConfig,
    /// Kept sorted by priority; ties stay in registration order
    hooks: Vec<Registration>,
}

impl HookPipeline {
    pub fn new(enrichment: EnrichmentConfig) -> Self {
        Self {
            enrichment,
            hooks: Vec::new(),
        }
    }

    /// Register a hook. Lower priorities run first; hooks with equal
    /// priority run in registration order. Registering the same identity
    /// twice is allowed and runs it twice.
    pub fn register(&mut self, hook: Box<dyn DomainHook>, priority: i32) {
        self.hooks.push(Registration { hook, priority });
        // Stable sort preserves registration order within a priority
        self.hooks.sort_by_key(|r| r.priority);
    }

    /// Register a closure under an id, without a named hook type
    pub fn register_fn<F>(&mut self, id: &str, priority: i32, f: F)
    where
        F: Fn(&mut DomainRecord) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(
            Box::new(FnHook {
                id: id.to_string(),
                f,
            }),
            priority,
        );
    }

    /// Number of registered hooks
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Run both phases over a working copy of a loaded record
    pub fn run(&self, domain: &mut DomainRecord) -> DomainResult<()> {
        self.enrich(domain);

        for registration in &self.hooks {
            let hook = registration.hook.as_ref();
            if let Err(source) = hook.on_domain_load(domain) {
                tracing::error!(hook = %hook.id(), error = ?source, "Domain load hook failed");
                return Err(DomainError::Extension {
                    hook: hook.id().to_string(),
                    source,
                });
            }
        }
        Ok(())
    }

    /// Internal phase: compute `path` and `url` from the record and the
    /// injected configuration. Runs before any external hook so they can
    /// observe both values.
    fn enrich(&self, domain: &mut DomainRecord) {
        domain.path = self.enrichment.base_path.clone();
        domain.url = format!(
            "{}://{}{}",
            self.enrichment.scheme, domain.hostname, self.enrichment.base_path
        );
    }
}

impl Default for HookPipeline {
    fn default() -> Self {
        Self::new(EnrichmentConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded(hostname: &str) -> DomainRecord {
        DomainRecord::new(hostname)
    }

    #[test]
    fn test_internal_phase_sets_path_and_url() {
        let pipeline = HookPipeline::default();
        let mut domain = loaded("example.com");

        pipeline.run(&mut domain).unwrap();

        assert_eq!(domain.path, "/");
        assert_eq!(domain.url, "https://example.com/");
    }

    #[test]
    fn test_enrichment_uses_injected_config() {
        let pipeline = HookPipeline::new(EnrichmentConfig {
            scheme: "http".to_string(),
            base_path: "/tenants/".to_string(),
        });
        let mut domain = loaded("example.com");

        pipeline.run(&mut domain).unwrap();

        assert_eq!(domain.path, "/tenants/");
        assert_eq!(domain.url, "http://example.com/tenants/");
    }

    #[test]
    fn test_hook_writes_extension_data() {
        let mut pipeline = HookPipeline::default();
        pipeline.register_fn("set_foo", 0, |domain| {
            domain.extension_data.insert("foo".to_string(), json!("bar"));
            Ok(())
        });

        let mut domain = loaded("example.com");
        pipeline.run(&mut domain).unwrap();

        assert_eq!(domain.extension_data.get("foo"), Some(&json!("bar")));
    }

    #[test]
    fn test_hooks_observe_internal_phase() {
        let mut pipeline = HookPipeline::default();
        pipeline.register_fn("copy_url", 0, |domain| {
            let url = domain.url.clone();
            anyhow::ensure!(!url.is_empty(), "url not set before external phase");
            domain.extension_data.insert("seen_url".to_string(), json!(url));
            Ok(())
        });

        let mut domain = loaded("example.com");
        pipeline.run(&mut domain).unwrap();

        assert_eq!(
            domain.extension_data.get("seen_url"),
            Some(&json!("https://example.com/"))
        );
    }

    #[test]
    fn test_registration_order_is_execution_order() {
        let mut pipeline = HookPipeline::default();
        // B reads what A wrote; both at the same priority
        pipeline.register_fn("a", 0, |domain| {
            domain.extension_data.insert("chain".to_string(), json!("a"));
            Ok(())
        });
        pipeline.register_fn("b", 0, |domain| {
            let prior = domain
                .extension_data
                .get("chain")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            domain
                .extension_data
                .insert("chain".to_string(), json!(format!("{prior}b")));
            Ok(())
        });

        let mut domain = loaded("example.com");
        pipeline.run(&mut domain).unwrap();

        assert_eq!(domain.extension_data.get("chain"), Some(&json!("ab")));
    }

    #[test]
    fn test_priority_overrides_registration_order() {
        let mut pipeline = HookPipeline::default();
        pipeline.register_fn("late", 10, |domain| {
            domain.extension_data.insert("order".to_string(), json!("late"));
            Ok(())
        });
        pipeline.register_fn("early", -10, |domain| {
            domain.extension_data.insert("order".to_string(), json!("early"));
            Ok(())
        });

        let mut domain = loaded("example.com");
        pipeline.run(&mut domain).unwrap();

        // The higher-priority hook ran last, so its write wins
        assert_eq!(domain.extension_data.get("order"), Some(&json!("late")));
    }

    #[test]
    fn test_failing_hook_aborts_remaining() {
        let mut pipeline = HookPipeline::default();
        pipeline.register_fn("first", 0, |domain| {
            domain.extension_data.insert("first".to_string(), json!(true));
            Ok(())
        });
        pipeline.register_fn("broken", 0, |_| anyhow::bail!("hook exploded"));
        pipeline.register_fn("never", 0, |domain| {
            domain.extension_data.insert("never".to_string(), json!(true));
            Ok(())
        });

        let mut domain = loaded("example.com");
        let err = pipeline.run(&mut domain).unwrap_err();

        match err {
            DomainError::Extension { hook, source } => {
                assert_eq!(hook, "broken");
                assert!(source.to_string().contains("exploded"));
            }
            other => panic!("expected Extension error, got: {other:?}"),
        }
        // No rollback of the first hook's write, but the third never ran
        assert_eq!(domain.extension_data.get("first"), Some(&json!(true)));
        assert!(!domain.extension_data.contains_key("never"));
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        struct Bump;
        impl DomainHook for Bump {
            fn id(&self) -> &str {
                "bump"
            }
            fn on_domain_load(&self, domain: &mut DomainRecord) -> anyhow::Result<()> {
                let n = domain
                    .extension_data
                    .get("count")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(0);
                domain.extension_data.insert("count".to_string(), json!(n + 1));
                Ok(())
            }
        }

        let mut pipeline = HookPipeline::default();
        pipeline.register(Box::new(Bump), 0);
        pipeline.register(Box::new(Bump), 0);
        assert_eq!(pipeline.hook_count(), 2);

        let mut domain = loaded("example.com");
        pipeline.run(&mut domain).unwrap();

        assert_eq!(domain.extension_data.get("count"), Some(&json!(2)));
    }
}
