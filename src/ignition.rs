//! Ignition on/off decision.

/// Returns the ignition state after this tick.
///
/// A confirmed button release toggles the ignition, except that switching on
/// also needs the driver seat to be occupied on that same tick. A release
/// without occupancy is dropped, it is not remembered for later.
pub fn update_ignition(occupied: bool, release_event: bool, ignition_on: bool) -> bool {
    match (ignition_on, release_event) {
        (true, true) => false,
        (false, true) => occupied,
        (state, false) => state,
    }
}
