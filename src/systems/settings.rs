//! Applies [`Settings`] to the systems that depend on them.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::inputcontrolled::InputControlled;
use crate::events::host::HostMessage;
use crate::resources::joystick::JoystickState;
use crate::resources::settings::Settings;

/// Push changed settings into the joystick and the player, and echo them to
/// the host. Runs on the first tick as well, since insertion counts as a
/// change.
pub fn apply_settings_changes(
    settings: Res<Settings>,
    mut stick: ResMut<JoystickState>,
    mut query: Query<&mut InputControlled>,
    mut host: MessageWriter<HostMessage>,
) {
    if !settings.is_changed() {
        return;
    }
    info!(
        "Applying settings: speed x{}, sensitivity {}, vibration {}",
        settings.move_speed_multiplier, settings.touch_sensitivity, settings.vibration
    );
    stick.set_sensitivity(settings.touch_sensitivity);
    for mut controlled in query.iter_mut() {
        controlled.speed_multiplier = settings.move_speed_multiplier;
    }
    host.write(HostMessage::Settings(settings.clone()));
}
