use bevy::prelude::*;

/// Tells the camera rig when the pointer starts or stops using the monitor.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraRigSignal {
    EnterMonitor,
    LeftMonitor,
}

/// Tracks whether the pointer is over the embedded document.
///
/// A leave that happens mid-drag is held back until the button is released,
/// so a drag started on the monitor does not yank the camera away.
#[derive(Resource, Debug, Default)]
pub struct CameraHandoff {
    inside: bool,
    button_held: bool,
    leave_deferred: bool,
}

impl CameraHandoff {
    pub fn inside(&self) -> bool {
        self.inside
    }

    pub fn leave_deferred(&self) -> bool {
        self.leave_deferred
    }

    pub fn pointer_moved(&mut self, inside: bool) -> Option<CameraRigSignal> {
        let was_inside = self.inside;

        if inside {
            if self.leave_deferred {
                // Back before release: the camera never left.
                self.leave_deferred = false;
                self.inside = true;
                return None;
            }
            self.inside = true;
            return (!was_inside).then_some(CameraRigSignal::EnterMonitor);
        }

        if !was_inside || self.leave_deferred {
            return None;
        }
        if self.button_held {
            self.leave_deferred = true;
            return None;
        }
        self.inside = false;
        Some(CameraRigSignal::LeftMonitor)
    }

    pub fn button_pressed(&mut self) {
        self.button_held = true;
    }

    pub fn button_released(&mut self) -> Option<CameraRigSignal> {
        self.button_held = false;
        if !self.leave_deferred {
            return None;
        }
        self.leave_deferred = false;
        self.inside = false;
        Some(CameraRigSignal::LeftMonitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CameraRigSignal::*;

    #[test]
    fn crossing_without_buttons_signals_immediately() {
        let mut handoff = CameraHandoff::default();
        assert_eq!(handoff.pointer_moved(true), Some(EnterMonitor));
        assert_eq!(handoff.pointer_moved(true), None);
        assert_eq!(handoff.pointer_moved(false), Some(LeftMonitor));
        assert_eq!(handoff.pointer_moved(false), None);
    }

    #[test]
    fn leave_during_a_drag_fires_once_on_release() {
        let mut handoff = CameraHandoff::default();
        handoff.pointer_moved(true);
        handoff.button_pressed();

        assert_eq!(handoff.pointer_moved(false), None);
        assert_eq!(handoff.pointer_moved(false), None);
        assert!(handoff.leave_deferred());

        assert_eq!(handoff.button_released(), Some(LeftMonitor));
        assert_eq!(handoff.button_released(), None);
        assert_eq!(handoff.pointer_moved(false), None);
        assert!(!handoff.inside());
    }

    #[test]
    fn returning_before_release_cancels_the_leave_without_re_entering() {
        let mut handoff = CameraHandoff::default();
        handoff.pointer_moved(true);
        handoff.button_pressed();
        handoff.pointer_moved(false);

        assert_eq!(handoff.pointer_moved(true), None);
        assert!(!handoff.leave_deferred());
        assert_eq!(handoff.button_released(), None);
        assert!(handoff.inside());
    }

    #[test]
    fn pressing_outside_does_not_signal() {
        let mut handoff = CameraHandoff::default();
        handoff.button_pressed();
        assert_eq!(handoff.pointer_moved(false), None);
        assert_eq!(handoff.button_released(), None);
    }
}
