use glam::Vec2;

/// Latest cursor position and whether the cursor is over the surface.
///
/// The position is kept after the pointer leaves so the overlay can still
/// show where it was last seen; only `active` gates repulsion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub active: bool,
}

impl Pointer {
    pub fn moved(&mut self, position: Vec2) {
        self.position = position;
        self.active = true;
    }

    pub fn left(&mut self) {
        self.active = false;
    }

    /// Position of the pointer if it currently acts on the field.
    pub fn active_position(&self) -> Option<Vec2> {
        self.active.then_some(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let pointer = Pointer::default();
        assert!(!pointer.active);
        assert_eq!(pointer.active_position(), None);
    }

    #[test]
    fn test_move_then_leave() {
        let mut pointer = Pointer::default();

        pointer.moved(Vec2::new(12.0, 34.0));
        assert_eq!(pointer.active_position(), Some(Vec2::new(12.0, 34.0)));

        pointer.left();
        assert_eq!(pointer.active_position(), None);
        assert_eq!(pointer.position, Vec2::new(12.0, 34.0));

        pointer.moved(Vec2::new(1.0, 2.0));
        assert_eq!(pointer.active_position(), Some(Vec2::new(1.0, 2.0)));
    }
}
