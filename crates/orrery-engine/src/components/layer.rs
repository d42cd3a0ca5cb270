/// Layer membership mask, three.js style.
///
/// Every entity starts on layer 0 (`DEFAULT`). Raycast picking is restricted
/// to a layer: only entities whose mask includes that layer are tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layers(u32);

impl Layers {
    /// Layer 0: everything rendered.
    pub const DEFAULT: u8 = 0;
    /// Layer 1: entities the pointer can pick.
    pub const PICK: u8 = 1;

    /// Mask containing only `layer`.
    pub fn only(layer: u8) -> Self {
        Self(1 << (layer & 31))
    }

    /// Mask with no layers set.
    pub fn none() -> Self {
        Self(0)
    }

    /// Add a layer to the mask.
    pub fn enable(&mut self, layer: u8) {
        self.0 |= 1 << (layer & 31);
    }

    /// Remove a layer from the mask.
    pub fn disable(&mut self, layer: u8) {
        self.0 &= !(1 << (layer & 31));
    }

    /// Whether `layer` is part of the mask.
    pub fn contains(&self, layer: u8) -> bool {
        self.0 & (1 << (layer & 31)) != 0
    }

    /// Whether the two masks share at least one layer.
    pub fn intersects(&self, other: Layers) -> bool {
        self.0 & other.0 != 0
    }

    /// Raw bits for protocol serialization.
    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::only(Self::DEFAULT)
    }
}
