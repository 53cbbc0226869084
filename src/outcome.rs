//! Predicate outcomes.
//!
//! A predicate reports `true` (valid), `false` (invalid, use the default
//! message), a custom message, or a list of such outcomes of which the first
//! failing one counts.

/// The verdict a [`Predicate`](crate::Predicate) gives for one value.
///
/// # Example
///
/// ```rust
/// use loch::Outcome;
///
/// let outcome: Outcome = vec![Outcome::from(true), "too short".into(), false.into()].into();
/// assert_eq!(outcome.into_failure(), Some(Outcome::Message("too short".to_string())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    /// Rejected without a message; the validator supplies `"{key} is not valid"`.
    Invalid,
    /// Rejected with a custom message.
    Message(String),
    /// Several verdicts; the first non-valid one decides.
    All(Vec<Outcome>),
}

impl Outcome {
    /// Returns the first failing leaf outcome, flattening nested lists.
    ///
    /// `None` means the value passed. The returned outcome is always
    /// `Invalid` or `Message`.
    pub fn into_failure(self) -> Option<Outcome> {
        match self {
            Outcome::Valid => None,
            Outcome::Invalid | Outcome::Message(_) => Some(self),
            Outcome::All(outcomes) => outcomes.into_iter().find_map(Outcome::into_failure),
        }
    }

    /// True when no failure is found anywhere in the outcome.
    pub fn is_valid(&self) -> bool {
        match self {
            Outcome::Valid => true,
            Outcome::Invalid | Outcome::Message(_) => false,
            Outcome::All(outcomes) => outcomes.iter().all(Outcome::is_valid),
        }
    }

    /// Resolves the outcome to an error message for `key`, if it failed.
    pub(crate) fn message_for(self, key: &str) -> Option<String> {
        match self.into_failure()? {
            Outcome::Message(message) => Some(message),
            _ => Some(crate::messages::default(key)),
        }
    }
}

impl From<bool> for Outcome {
    fn from(valid: bool) -> Self {
        if valid {
            Outcome::Valid
        } else {
            Outcome::Invalid
        }
    }
}

impl From<String> for Outcome {
    fn from(message: String) -> Self {
        Outcome::Message(message)
    }
}

impl From<&str> for Outcome {
    fn from(message: &str) -> Self {
        Outcome::Message(message.to_string())
    }
}

impl From<Vec<Outcome>> for Outcome {
    fn from(outcomes: Vec<Outcome>) -> Self {
        Outcome::All(outcomes)
    }
}
