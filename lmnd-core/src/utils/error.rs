use std::fmt;

/// An error produced by the core library.
///
/// Missing-data and degenerate-input variants are always fatal and propagated immediately,
/// never retried. Sub-optimal solver termination is *not* an error and is reported through
/// the solve report instead; only backend crashes and invalid parameters surface here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// A required distance entry is absent from the distance data.
    MissingDistance {
        /// A facility id of the lookup.
        facility: String,
        /// A zone id of the lookup, or `None` for a facility-to-depot lookup.
        zone: Option<String>,
    },
    /// A required continuous-approximation output is absent for the given key.
    MissingEstimate(String),
    /// A required decision variable is absent from the variable store.
    MissingVariable(String),
    /// Degenerate numeric input reached a closed-form formula.
    DegenerateInput(String),
    /// An invalid configuration value was supplied.
    InvalidConfiguration(String),
    /// Input data could not be read or parsed.
    InvalidData(String),
    /// An operation was invoked out of its lifecycle order.
    InvalidState(String),
    /// The external solver backend failed.
    Backend(String),
}

/// A type alias for a result with [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::MissingDistance { facility, zone: Some(zone) } => {
                write!(f, "no distance entry for facility '{facility}' and zone '{zone}'")
            }
            ModelError::MissingDistance { facility, zone: None } => {
                write!(f, "no depot distance entry for facility '{facility}'")
            }
            ModelError::MissingEstimate(key) => write!(f, "no serving estimate for {key}"),
            ModelError::MissingVariable(name) => write!(f, "no variable '{name}' in the store"),
            ModelError::DegenerateInput(msg) => write!(f, "degenerate input: {msg}"),
            ModelError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            ModelError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            ModelError::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            ModelError::Backend(msg) => write!(f, "solver backend failure: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}
