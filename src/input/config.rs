// Binding suggestions and runtime configuration

use super::action::ActionHandle;
use super::profile::{compatibility_mapping, InteractionProfile};
use crate::core::Path;
use std::collections::HashMap;

/// One application-suggested (action, path) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedBinding {
    pub action: ActionHandle,
    pub binding: Path,
}

impl SuggestedBinding {
    pub fn new(action: ActionHandle, binding: Path) -> Self {
        Self { action, binding }
    }
}

/// Suggested bindings, grouped by interaction profile
///
/// Suggestions for profile paths the runtime does not know are dropped: they
/// could never be selected.
#[derive(Debug, Default)]
pub struct BindingStore {
    profiles: HashMap<InteractionProfile, Vec<SuggestedBinding>>,
}

impl BindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list of suggestions for a profile
    ///
    /// Returns the profile the list was stored under, or `None` for an
    /// unsupported profile path.
    pub fn suggest(
        &mut self,
        profile_path: &str,
        bindings: Vec<SuggestedBinding>,
    ) -> Option<InteractionProfile> {
        let profile = InteractionProfile::from_path(profile_path)?;
        self.profiles.insert(profile, bindings);
        Some(profile)
    }

    /// Get the suggestions for a profile
    pub fn get(&self, profile: InteractionProfile) -> Option<&[SuggestedBinding]> {
        self.profiles.get(&profile).map(Vec::as_slice)
    }

    /// Check if a profile has suggestions
    pub fn has_profile(&self, profile: InteractionProfile) -> bool {
        self.profiles.contains_key(&profile)
    }

    /// Pick the profile to bind: the preferred one if suggested, otherwise the
    /// first suggested profile from `fallbacks`
    ///
    /// Candidates whose bindings cannot be mapped onto `preferred` hardware are
    /// skipped.
    pub fn select_profile(
        &self,
        preferred: InteractionProfile,
        fallbacks: &[InteractionProfile],
    ) -> Option<InteractionProfile> {
        std::iter::once(preferred)
            .chain(fallbacks.iter().copied())
            .filter(|profile| compatibility_mapping(*profile, preferred).is_some())
            .find(|profile| self.has_profile(*profile))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Runtime tunables, configured in code
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Profiles tried, in order, when the application did not suggest bindings
    /// for the connected controller's own profile
    pub fallback_profiles: Vec<InteractionProfile>,

    /// Log every latched hardware snapshot at trace level
    pub trace_input_state: bool,
}

impl RuntimeConfig {
    pub fn default_fallback_profiles() -> Vec<InteractionProfile> {
        vec![
            InteractionProfile::OculusTouch,
            InteractionProfile::MicrosoftMotion,
            InteractionProfile::KhrSimple,
        ]
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fallback_profiles: Self::default_fallback_profiles(),
            trace_input_state: true,
        }
    }
}
