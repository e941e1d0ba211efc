//! Idle/demo mode: a simple AI that plays the game from snapshots

use super::state::{Command, Snapshot};

/// How far above the bottom pipe the avatar's bottom edge is allowed to sink
const AIM_MARGIN: i32 = 10;

/// Decide whether to jump this tick.
///
/// Aims at the bottom edge of the nearest gap that is not yet behind the
/// avatar (or the middle of the sky when none is), and only flaps while
/// falling so jumps never stack into the ceiling.
pub fn autopilot(snapshot: &Snapshot) -> Option<Command> {
    if snapshot.is_over() {
        return None;
    }

    let avatar = snapshot.avatar;
    if avatar.velocity < 0 {
        return None;
    }

    let floor = snapshot
        .obstacles
        .iter()
        .filter(|o| o.bottom.right() >= avatar.x)
        .min_by_key(|o| o.x)
        .map(|o| o.bottom.top() - AIM_MARGIN)
        .unwrap_or(snapshot.ground_y() / 2 + avatar.size);

    (avatar.y + avatar.size >= floor).then_some(Command::Jump)
}
