//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ArithmeticService;
use crate::config::Settings;
use crate::infrastructure::traits::{InputSource, RealInputSource};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Snailfish arithmetic over puzzle input; owns the input source
    pub arithmetic: ArithmeticService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealInputSource))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, input: Arc<dyn InputSource>) -> Self {
        let arithmetic = ArithmeticService::new(input, &settings);
        let settings = Arc::new(settings);

        Self {
            settings,
            arithmetic,
        }
    }
}
