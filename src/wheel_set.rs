/// One value per swerve module, named by corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSet<T> {
    pub left_front: T,
    pub right_front: T,
    pub left_rear: T,
    pub right_rear: T,
}

impl<T> WheelSet<T> {
    pub fn new(left_front: T, right_front: T, left_rear: T, right_rear: T) -> Self {
        Self {
            left_front,
            right_front,
            left_rear,
            right_rear,
        }
    }

    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            left_front: value.clone(),
            right_front: value.clone(),
            left_rear: value.clone(),
            right_rear: value,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> WheelSet<U> {
        WheelSet {
            left_front: f(self.left_front),
            right_front: f(self.right_front),
            left_rear: f(self.left_rear),
            right_rear: f(self.right_rear),
        }
    }

    pub fn each_ref(&self) -> WheelSet<&T> {
        WheelSet {
            left_front: &self.left_front,
            right_front: &self.right_front,
            left_rear: &self.left_rear,
            right_rear: &self.right_rear,
        }
    }

    pub fn zip<U>(self, other: WheelSet<U>) -> WheelSet<(T, U)> {
        WheelSet {
            left_front: (self.left_front, other.left_front),
            right_front: (self.right_front, other.right_front),
            left_rear: (self.left_rear, other.left_rear),
            right_rear: (self.right_rear, other.right_rear),
        }
    }

    /// Iterates in the order left front, right front, left rear, right rear
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [
            &self.left_front,
            &self.right_front,
            &self.left_rear,
            &self.right_rear,
        ]
        .into_iter()
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        f(&mut self.left_front);
        f(&mut self.right_front);
        f(&mut self.left_rear);
        f(&mut self.right_rear);
    }

    pub fn all(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.iter().all(predicate)
    }
}
