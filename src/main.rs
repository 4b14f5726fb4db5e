use anyhow::Result;
use glam::{Quat, Vec2, Vec3};
use log::info;
use xr_input_core::core::Pose;
use xr_input_core::input::{
    ActionCreateInfo, ActionRuntime, ActionSetCreateInfo, ActionStateGetInfo, ActionType,
    ActionsSyncInfo, Hand, HapticActionInfo, HapticVibration, InteractionProfile,
    InteractionProfileSuggestedBinding, SessionActionSetsAttachInfo, SimulatedDevice,
    SuggestedBinding,
};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting input demo...");

    let mut runtime = ActionRuntime::new(SimulatedDevice::new());
    let instance = runtime.instance();
    let session = runtime.create_session(instance)?;

    // Declare the actions
    let set = runtime.create_action_set(instance, &ActionSetCreateInfo::new("gameplay", "Gameplay", 0))?;
    let fire = runtime.create_action(set, &ActionCreateInfo::new("fire", "Fire", ActionType::Boolean))?;
    let walk = runtime.create_action(set, &ActionCreateInfo::new("walk", "Walk", ActionType::Vector2f))?;
    let aim = runtime.create_action(set, &ActionCreateInfo::new("aim", "Aim", ActionType::Pose))?;
    let rumble = runtime.create_action(set, &ActionCreateInfo::new("rumble", "Rumble", ActionType::Vibration))?;

    // Suggest bindings for the Index controller
    let pairs = [
        (fire, "/user/hand/right/input/trigger/value"),
        (walk, "/user/hand/left/input/thumbstick"),
        (aim, "/user/hand/right/input/aim/pose"),
        (rumble, "/user/hand/right/output/haptic"),
    ];
    let mut bindings = Vec::with_capacity(pairs.len());
    for (action, path) in pairs {
        bindings.push(SuggestedBinding::new(action, runtime.string_to_path(instance, path)?));
    }
    let profile = runtime.string_to_path(instance, InteractionProfile::ValveIndex.path())?;
    runtime.suggest_interaction_profile_bindings(
        instance,
        &InteractionProfileSuggestedBinding::new(profile, bindings),
    )?;
    runtime.attach_session_action_sets(session, &SessionActionSetsAttachInfo::new(vec![set]))?;

    // Plug in a pair of Index controllers
    runtime.backend_mut().connect(Hand::Left, "knuckles");
    runtime.backend_mut().connect(Hand::Right, "knuckles");

    let sync = ActionsSyncInfo::for_sets(&[set]);
    for frame in 0..4u8 {
        {
            let device = runtime.backend_mut();
            device.advance(1.0 / 90.0);
            device.state.trigger[Hand::Right.index()] = if frame % 2 == 1 { 1.0 } else { 0.0 };
            device.state.joystick[Hand::Left.index()] = Vec2::new(0.0, f32::from(frame) * 0.25);
        }
        runtime.sync_actions(session, &sync)?;

        if runtime.take_interaction_profile_changed() {
            info!(
                "Interaction profile now {:?}",
                runtime.controller(Hand::Right).interaction_profile()
            );
        }

        let fire_state = runtime.get_action_state_boolean(session, &ActionStateGetInfo::new(fire))?;
        let walk_state = runtime.get_action_state_vector2f(session, &ActionStateGetInfo::new(walk))?;
        let aim_state = runtime.get_action_state_pose(session, &ActionStateGetInfo::new(aim))?;
        info!(
            "Frame {}: fire={} (changed: {}), walk={:?}, aim active={}",
            frame,
            fire_state.current_state,
            fire_state.changed_since_last_sync,
            walk_state.current_state,
            aim_state.is_active
        );

        if fire_state.current_state && fire_state.changed_since_last_sync {
            runtime.apply_haptic_feedback(
                session,
                &HapticActionInfo::new(rumble),
                &HapticVibration::new(0.8),
            )?;

            // Ray origin in grip space, corrected for the controller's aim offset
            let grip = Pose::new(Quat::IDENTITY, Vec3::new(0.2, 1.2, -0.3));
            let aim_pose = grip.compose(&runtime.controller_aim_pose(Hand::Right));
            info!("Fired from {:?}", aim_pose.position);
        }
    }

    info!(
        "Sent {} haptic pulses, shutting down...",
        runtime.backend().pulses.len()
    );
    runtime.destroy_session(session)?;
    Ok(())
}
