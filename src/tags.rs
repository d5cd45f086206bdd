//! Tag derivation for log entries.
//!
//! Every entry carries the logger's default tags unless an [`AutoTagger`] is
//! configured, in which case the tagger classifies each argument and the
//! per-argument results are concatenated in argument order.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, Serializer};

use crate::arg::LogArg;

/// Classification hook invoked once per logging argument.
pub trait AutoTagger: Send + Sync {
    /// Return the tags `arg` contributes to the entry.
    ///
    /// `defaults` are the logger's configured default tags; the tagger may
    /// include any of them in its result. An empty result contributes
    /// nothing.
    fn classify(&self, defaults: &[String], arg: &dyn LogArg) -> Vec<String>;
}

impl<F> AutoTagger for F
where
    F: Fn(&[String], &dyn LogArg) -> Vec<String> + Send + Sync,
{
    fn classify(&self, defaults: &[String], arg: &dyn LogArg) -> Vec<String> {
        self(defaults, arg)
    }
}

/// Tagging strategy held by a logger.
#[derive(Clone, Default)]
pub enum Tagging {
    /// Every entry carries the default tags unchanged.
    #[default]
    Defaults,
    /// Tags are computed per argument by the hook.
    Auto(Arc<dyn AutoTagger>),
}

impl fmt::Debug for Tagging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("Defaults"),
            Self::Auto(_) => f.write_str("Auto(..)"),
        }
    }
}

/// Tags attached to one entry.
///
/// `Absent` is distinct from an empty `Present` list: it serialises as JSON
/// `null` while `Present(&[])` serialises as `[]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tags<'a> {
    Present(Cow<'a, [String]>),
    Absent,
}

impl<'a> Tags<'a> {
    /// Borrow the tag list, or `None` for [`Tags::Absent`].
    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            Self::Present(tags) => Some(tags),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Detach from any borrowed defaults.
    pub fn into_owned(self) -> Tags<'static> {
        match self {
            Self::Present(tags) => Tags::Present(Cow::Owned(tags.into_owned())),
            Self::Absent => Tags::Absent,
        }
    }
}

impl From<Vec<String>> for Tags<'static> {
    fn from(tags: Vec<String>) -> Self {
        Self::Present(Cow::Owned(tags))
    }
}

impl<'a> From<&'a [String]> for Tags<'a> {
    fn from(tags: &'a [String]) -> Self {
        Self::Present(Cow::Borrowed(tags))
    }
}

impl Serialize for Tags<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Present(tags) => tags.serialize(serializer),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

/// Compute the tags for one logging call.
///
/// `defaults` is `None` when no default tags were ever configured, which is
/// distinct from an explicitly empty list. With [`Tagging::Defaults`] the
/// defaults are returned borrowed and unmodified, and unset defaults yield
/// [`Tags::Absent`]. With [`Tagging::Auto`] the hook runs once per argument
/// (seeing unset defaults as an empty slice); if no argument contributes a
/// tag the result is [`Tags::Absent`].
pub fn derive_tags<'a>(
    defaults: Option<&'a [String]>,
    tagging: &Tagging,
    args: &[&dyn LogArg],
) -> Tags<'a> {
    let tagger = match (tagging, defaults) {
        (Tagging::Defaults, Some(defaults)) => return Tags::Present(Cow::Borrowed(defaults)),
        (Tagging::Defaults, None) => return Tags::Absent,
        (Tagging::Auto(tagger), _) => tagger,
    };
    let defaults = defaults.unwrap_or_default();
    let tags: Vec<String> = args
        .iter()
        .flat_map(|arg| tagger.classify(defaults, *arg))
        .collect();
    if tags.is_empty() {
        Tags::Absent
    } else {
        Tags::Present(Cow::Owned(tags))
    }
}
