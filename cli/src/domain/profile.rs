//! Tri-state profile selection for new containers.

/// Which profiles to apply at creation time.
///
/// `Unspecified` and `ExplicitEmpty` must stay distinct all the way to the
/// wire: the first omits the field so the server applies its defaults, the
/// second sends an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileSelection {
    /// No profile flag was given.
    #[default]
    Unspecified,
    /// The profile flag was given without a value.
    ExplicitEmpty,
    /// One or more named profiles, in the order given. Never empty.
    ExplicitList(Vec<String>),
}

impl ProfileSelection {
    /// Build the selection from the collected profile tokens and the
    /// "flag given without a value" signal.
    #[must_use]
    pub fn from_flags(tokens: Vec<String>, requested_empty: bool) -> Self {
        if requested_empty && tokens.is_empty() {
            Self::ExplicitEmpty
        } else if !tokens.is_empty() {
            Self::ExplicitList(tokens)
        } else {
            Self::Unspecified
        }
    }

    /// The profile list to send, `None` meaning "leave it to the server".
    #[must_use]
    pub fn as_request(&self) -> Option<&[String]> {
        match self {
            Self::Unspecified => None,
            Self::ExplicitEmpty => Some(&[]),
            Self::ExplicitList(names) => Some(names),
        }
    }
}
