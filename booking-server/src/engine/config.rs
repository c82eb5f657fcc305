//! Engine configuration.

/// Configuration parameters for the admission and promotion engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of Active RAC entries per (train, route).
    /// Requests beyond this are routed to the waitlist.
    pub rac_capacity: u32,
}

impl EngineConfig {
    /// Create a configuration with the given RAC capacity.
    pub fn new(rac_capacity: u32) -> Self {
        Self { rac_capacity }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { rac_capacity: 100 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(EngineConfig::default().rac_capacity, 100);
    }

    #[test]
    fn custom_config() {
        assert_eq!(EngineConfig::new(5).rac_capacity, 5);
    }
}
