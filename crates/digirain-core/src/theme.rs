//! Named color palettes.

use rand::Rng;

use crate::color::{Rgb, Rgba};

/// An immutable color palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Human readable name shown in the controls panel.
    pub display_name: &'static str,
    pub background: Rgb,
    pub foreground: Rgb,
    /// Color of the leading glyph and of the shadow glow.
    pub glow: Rgb,
    /// Suggested trail overlay color.
    pub trail_hint: Rgba,
    /// Lowest-performance palette: glow is not floored.
    pub low_power: bool,
}

const BUILTIN: &[(&str, Theme)] = &[
    (
        "matrix",
        Theme {
            display_name: "Classic Green",
            background: Rgb::new(0x00, 0x00, 0x00),
            foreground: Rgb::new(0x00, 0xff, 0x00),
            glow: Rgb::new(0x00, 0xff, 0x00),
            trail_hint: Rgb::new(0, 0, 0).with_alpha(0.05),
            low_power: false,
        },
    ),
    (
        "ocean",
        Theme {
            display_name: "Ocean Blue",
            background: Rgb::new(0x00, 0x08, 0x14),
            foreground: Rgb::new(0x00, 0xb4, 0xd8),
            glow: Rgb::new(0x90, 0xe0, 0xef),
            trail_hint: Rgb::new(0, 8, 20).with_alpha(0.05),
            low_power: false,
        },
    ),
    (
        "sunset",
        Theme {
            display_name: "Sunset Red",
            background: Rgb::new(0x0a, 0x0a, 0x0a),
            foreground: Rgb::new(0xff, 0x00, 0x6e),
            glow: Rgb::new(0xff, 0x40, 0x81),
            trail_hint: Rgb::new(10, 10, 10).with_alpha(0.05),
            low_power: false,
        },
    ),
    (
        "cyber",
        Theme {
            display_name: "Cyber Purple",
            background: Rgb::new(0x0d, 0x02, 0x21),
            foreground: Rgb::new(0xc7, 0x7d, 0xff),
            glow: Rgb::new(0xe0, 0xaa, 0xff),
            trail_hint: Rgb::new(13, 2, 33).with_alpha(0.05),
            low_power: false,
        },
    ),
    (
        "amber",
        Theme {
            display_name: "Amber Glow",
            background: Rgb::new(0x1a, 0x00, 0x33),
            foreground: Rgb::new(0xff, 0xb7, 0x00),
            glow: Rgb::new(0xff, 0xea, 0x00),
            trail_hint: Rgb::new(26, 0, 51).with_alpha(0.05),
            low_power: false,
        },
    ),
    (
        "mono",
        Theme {
            display_name: "Monochrome",
            background: Rgb::new(0x00, 0x00, 0x00),
            foreground: Rgb::new(0xff, 0xff, 0xff),
            glow: Rgb::new(0xcc, 0xcc, 0xcc),
            trail_hint: Rgb::new(0, 0, 0).with_alpha(0.05),
            low_power: false,
        },
    ),
    (
        "matrix-lite",
        Theme {
            display_name: "Matrix Lite (Performance)",
            background: Rgb::new(0x00, 0x00, 0x00),
            foreground: Rgb::new(0x00, 0xcc, 0x00),
            glow: Rgb::new(0x00, 0xcc, 0x00),
            trail_hint: Rgb::new(0, 0, 0).with_alpha(0.1),
            low_power: true,
        },
    ),
];

/// Read-only lookup table from theme key to palette.
///
/// The table is injected into the renderer rather than read from a global, so
/// tests can supply their own palettes.
#[derive(Debug, Clone, Copy)]
pub struct ThemeTable {
    entries: &'static [(&'static str, Theme)],
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeTable {
    /// The palettes shipped with digirain.
    pub const fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    /// Wrap a custom static table.
    pub const fn from_static(entries: &'static [(&'static str, Theme)]) -> Self {
        Self { entries }
    }

    /// Look up a palette by key.
    pub fn get(&self, key: &str) -> Option<&Theme> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, theme)| theme)
    }

    /// Keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key following `key` in table order, wrapping around.
    ///
    /// Unknown keys start the cycle over from the first entry.
    pub fn next_key(&self, key: &str) -> Option<&'static str> {
        let pos = self.entries.iter().position(|(k, _)| *k == key);
        let next = pos.map_or(0, |p| (p + 1) % self.entries.len());
        self.entries.get(next).map(|(k, _)| *k)
    }

    /// A uniformly random key, or `None` for an empty table.
    pub fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static str> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.entries.len());
        Some(self.entries[idx].0)
    }

    /// Whether `key` names a low-power palette.
    pub fn is_low_power(&self, key: &str) -> bool {
        self.get(key).is_some_and(|t| t.low_power)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = ThemeTable::builtin();
        assert_eq!(table.len(), 7);
        let ocean = table.get("ocean").unwrap();
        assert_eq!(ocean.display_name, "Ocean Blue");
        assert_eq!(ocean.glow, Rgb::from_hex("#90e0ef").unwrap());
        assert!(table.get("nope").is_none());
    }

    #[test]
    fn test_only_lite_is_low_power() {
        let table = ThemeTable::builtin();
        let low: Vec<_> = table.keys().filter(|k| table.is_low_power(k)).collect();
        assert_eq!(low, vec!["matrix-lite"]);
        assert!(!table.is_low_power("unknown"));
    }

    #[test]
    fn test_next_key_wraps() {
        let table = ThemeTable::builtin();
        assert_eq!(table.next_key("matrix"), Some("ocean"));
        assert_eq!(table.next_key("matrix-lite"), Some("matrix"));
        assert_eq!(table.next_key("bogus"), Some("matrix"));
    }

    #[test]
    fn test_random_key_is_member() {
        let table = ThemeTable::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let key = table.random_key(&mut rng).unwrap();
            assert!(table.get(key).is_some());
        }
        assert!(ThemeTable::from_static(&[]).random_key(&mut rng).is_none());
    }
}
