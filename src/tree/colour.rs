use std::fmt;

use rand::Rng;

/// Fixed RGB tag assigned to a node when it is built.
/// Only leaf colours ever reach the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColourTag {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColourTag {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draw a uniformly random tag.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let [r, g, b] = rng.gen::<[u8; 3]>();
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for ColourTag {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for ColourTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
