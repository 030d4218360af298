use serde::{Deserialize, Serialize};

/// What the bus does when a subscriber returns an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchPolicy {
    /// Stop dispatching the event and return the error from `publish`
    FailFast,
    /// Report the fault as a diagnostic and keep delivering to later subscribers
    Isolate,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        DispatchPolicy::FailFast
    }
}

/// Configuration for a [`PubSub`](super::PubSub) instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusConfig {
    pub dispatch_policy: DispatchPolicy,
    /// Deepest allowed chain of publish-within-handle calls. A top-level
    /// publish is depth 1; sale/refill handlers emit at depth 2.
    pub max_publish_depth: usize,
}

impl BusConfig {
    /// Fail-fast dispatch with a nesting limit of 4
    pub fn new() -> Self {
        Self {
            dispatch_policy: DispatchPolicy::default(),
            max_publish_depth: 4,
        }
    }

    /// Set what happens when a subscriber returns an error
    ///
    /// # Arguments
    /// * `policy` - Fail-fast or isolate
    ///
    /// # Returns
    /// A new configuration with the specified dispatch policy
    pub fn with_dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch_policy = policy;
        self
    }

    /// Set the nesting limit for publish-within-handle chains
    ///
    /// # Arguments
    /// * `depth` - Deepest allowed publish; clamped to at least 1 so
    ///   top-level publishes always run
    ///
    /// # Returns
    /// A new configuration with the specified nesting limit
    pub fn with_max_publish_depth(mut self, depth: usize) -> Self {
        self.max_publish_depth = depth.max(1);
        self
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BusConfig::default();
        assert_eq!(config.dispatch_policy, DispatchPolicy::FailFast);
        assert_eq!(config.max_publish_depth, 4);
    }

    #[test]
    fn test_config_builder() {
        let config = BusConfig::new()
            .with_dispatch_policy(DispatchPolicy::Isolate)
            .with_max_publish_depth(0);

        assert_eq!(config.dispatch_policy, DispatchPolicy::Isolate);
        assert_eq!(config.max_publish_depth, 1);
    }
}
