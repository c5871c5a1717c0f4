use std::sync::Arc;

/// Specifies a logging callback used to print progress information.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps track of cross-cutting execution settings shared by long-running operations.
#[derive(Clone)]
pub struct Environment {
    /// A logger used to print information messages.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment` with the given logger.
    pub fn new(logger: InfoLogger) -> Self {
        Self { logger }
    }

    /// Creates an instance of `Environment` which discards all messages.
    pub fn silent() -> Self {
        Self::new(Arc::new(|_| {}))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Arc::new(|msg: &str| println!("{msg}")))
    }
}
