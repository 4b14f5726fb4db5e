// Per-hand controller state and the controller binding resolver

use super::action::Action;
use super::config::BindingStore;
use super::hardware::Hand;
use super::profile::{compatibility_mapping, ControllerFamily, InteractionProfile};
use crate::core::{Arena, PathInterner, Pose};
use log::{debug, info, warn};

/// What the runtime knows about the controller held in one hand
#[derive(Debug, Clone)]
pub struct HandController {
    hand: Hand,

    /// Type string reported by the hardware at the last sync
    controller_type: Option<String>,

    /// Display name of the detected hardware
    localized_name: String,

    /// Profile the hand's bindings were resolved against
    interaction_profile: Option<InteractionProfile>,

    /// Grip-to-aim correction for the detected hardware
    aim_pose: Pose,
}

impl HandController {
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            controller_type: None,
            localized_name: String::new(),
            interaction_profile: None,
            aim_pose: Pose::IDENTITY,
        }
    }

    /// Hand this controller state belongs to
    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// Check if a controller is connected for this hand
    pub fn is_present(&self) -> bool {
        self.controller_type.is_some()
    }

    /// Raw type string last reported by the hardware
    pub fn controller_type(&self) -> Option<&str> {
        self.controller_type.as_deref()
    }

    /// Display name of the detected controller, empty when absent
    pub fn localized_name(&self) -> &str {
        &self.localized_name
    }

    pub fn interaction_profile(&self) -> Option<InteractionProfile> {
        self.interaction_profile
    }

    /// Grip-to-aim offset, identity when nothing is bound
    pub fn aim_pose(&self) -> Pose {
        self.aim_pose
    }

    /// Record the type detected this cycle; returns true when it changed
    pub(crate) fn update_controller_type(&mut self, detected: Option<String>) -> bool {
        if detected == self.controller_type {
            return false;
        }
        info!(
            "{} controller type changed: {:?} -> {:?}",
            self.hand, self.controller_type, detected
        );
        self.controller_type = detected;
        true
    }

    /// Re-derive the interaction profile and rewire every suggested binding
    /// for the newly detected hardware
    ///
    /// Only one binding per action is honored: when several suggestions target
    /// the same action, the last one wins.
    pub(crate) fn rebind(
        &mut self,
        store: &BindingStore,
        fallbacks: &[InteractionProfile],
        actions: &mut Arena<Action>,
        paths: &PathInterner,
    ) {
        let Some(controller_type) = self.controller_type.as_deref() else {
            info!("{} controller disconnected, no interaction profile", self.hand);
            self.localized_name.clear();
            self.interaction_profile = None;
            self.aim_pose = Pose::IDENTITY;
            return;
        };

        let family = ControllerFamily::from_controller_type(controller_type);
        let preferred = family.preferred_profile();
        self.localized_name = family.localized_name().to_string();

        let selected = store
            .select_profile(preferred, fallbacks)
            .and_then(|resolved| {
                compatibility_mapping(resolved, preferred).map(|mapping| (resolved, mapping))
            });
        let Some((resolved, mapping)) = selected else {
            info!(
                "{} hand: no usable bindings suggested for {} or any fallback",
                self.hand, preferred
            );
            self.interaction_profile = None;
            self.aim_pose = Pose::IDENTITY;
            return;
        };

        for suggestion in store.get(resolved).unwrap_or_default() {
            let Some(action) = actions.get_mut(suggestion.action) else {
                warn!(
                    "Skipping binding for unknown action {:?}",
                    suggestion.action
                );
                continue;
            };
            let Some(path) = paths.resolve(suggestion.binding) else {
                warn!("Skipping binding with unknown path {}", suggestion.binding);
                continue;
            };
            mapping(&mut action.binding, path);
        }

        debug!("{} hand resolved {} for {}", self.hand, resolved, family);
        info!("{} hand interaction profile: {}", self.hand, resolved);
        self.interaction_profile = Some(resolved);
        self.aim_pose = family.aim_pose();
    }
}
