//! Modifier-key sets (pure Rust, no FFI).
//!
//! Bits use the NSEvent / CGEventFlags layout so that a raw flag word read
//! from an event tap can be masked and compared without translation.

use std::fmt;
use std::ops::BitOr;

/// A set of device-independent modifier flags stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet(u64);

impl ModifierSet {
    pub const EMPTY: ModifierSet = ModifierSet(0);
    pub const CAPS_LOCK: ModifierSet = ModifierSet(1 << 16);
    pub const SHIFT: ModifierSet = ModifierSet(1 << 17);
    pub const CONTROL: ModifierSet = ModifierSet(1 << 18);
    pub const OPTION: ModifierSet = ModifierSet(1 << 19);
    pub const COMMAND: ModifierSet = ModifierSet(1 << 20);
    pub const NUMERIC_PAD: ModifierSet = ModifierSet(1 << 21);
    pub const HELP: ModifierSet = ModifierSet(1 << 22);
    pub const FUNCTION: ModifierSet = ModifierSet(1 << 23);

    /// NSEventModifierFlagDeviceIndependentFlagsMask.
    pub const DEVICE_INDEPENDENT_MASK: u64 = 0xffff_0000;

    /// Build a set from stored bits, dropping anything outside the
    /// device-independent range.
    pub const fn from_bits(bits: u64) -> Self {
        ModifierSet(bits & Self::DEVICE_INDEPENDENT_MASK)
    }

    /// Normalise the raw flag word of an input event.
    ///
    /// Device-dependent bits (left/right side, etc.) are discarded so the
    /// same chord compares equal regardless of which physical key was used.
    pub const fn from_event_flags(raw: u64) -> Self {
        Self::from_bits(raw)
    }

    /// Decode the `AXMenuItemCmdModifiers` hint of a menu item.
    ///
    /// bit0 = Shift, bit1 = Option, bit2 = Control, bit3 = Command.
    pub fn from_menu_item_modifiers(raw: i64) -> Self {
        let mut set = ModifierSet::EMPTY;
        if raw & 1 != 0 {
            set = set | ModifierSet::SHIFT;
        }
        if raw & 2 != 0 {
            set = set | ModifierSet::OPTION;
        }
        if raw & 4 != 0 {
            set = set | ModifierSet::CONTROL;
        }
        if raw & 8 != 0 {
            set = set | ModifierSet::COMMAND;
        }
        set
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: ModifierSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: ModifierSet) -> Self {
        ModifierSet(self.0 | other.0)
    }

    pub const fn without(self, other: ModifierSet) -> Self {
        ModifierSet(self.0 & !other.0)
    }
}

impl BitOr for ModifierSet {
    type Output = ModifierSet;

    fn bitor(self, rhs: ModifierSet) -> ModifierSet {
        self.union(rhs)
    }
}

impl fmt::Display for ModifierSet {
    /// Renders the chord in menu order, e.g. `⌃⌥⇧⌘`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SYMBOLS: [(ModifierSet, &str); 5] = [
            (ModifierSet::FUNCTION, "fn"),
            (ModifierSet::CONTROL, "⌃"),
            (ModifierSet::OPTION, "⌥"),
            (ModifierSet::SHIFT, "⇧"),
            (ModifierSet::COMMAND, "⌘"),
        ];
        for (flag, symbol) in SYMBOLS {
            if self.contains(flag) {
                f.write_str(symbol)?;
            }
        }
        Ok(())
    }
}
