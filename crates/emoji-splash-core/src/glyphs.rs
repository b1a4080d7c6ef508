//! Emoji categories and their glyph sets

use rand::Rng;
use serde::{Deserialize, Serialize};

const FACES: &[&str] = &[
    "😀", "😂", "🥰", "😎", "🤩", "😜", "🤯", "😱", "🥳", "😇", "🤠", "😴", "🤪", "😍", "🙃",
    "😭",
];

const FOOD: &[&str] = &[
    "🍔", "🍕", "🌭", "🍟", "🍩", "🍪", "🍎", "🍉", "🍓", "🍒", "🥑", "🌮", "🍣", "🧁", "🍦",
    "🥨",
];

const ANIMALS: &[&str] = &[
    "🦊", "🐶", "🐱", "🐼", "🐨", "🐸", "🐵", "🐧", "🐥", "🦄", "🐙", "🐢", "🦁", "🐷", "🐰",
    "🐝",
];

const ACTIVITIES: &[&str] = &[
    "⚽", "🏀", "🏈", "⚾", "🎾", "🏐", "🎱", "🏓", "🎯", "🎳", "🥊", "🎲", "🎮", "🛹", "🏆",
    "🎸",
];

/// Selects which glyph set new entities draw from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmojiCategory {
    Faces,
    Food,
    Animals,
    Activities,
    /// Union of every other category
    #[default]
    Random,
}

impl EmojiCategory {
    /// All categories in selector order
    pub const ALL: [EmojiCategory; 5] = [
        EmojiCategory::Random,
        EmojiCategory::Faces,
        EmojiCategory::Food,
        EmojiCategory::Animals,
        EmojiCategory::Activities,
    ];

    /// The glyph sets this category draws from
    fn sets(self) -> &'static [&'static [&'static str]] {
        match self {
            EmojiCategory::Faces => &[FACES],
            EmojiCategory::Food => &[FOOD],
            EmojiCategory::Animals => &[ANIMALS],
            EmojiCategory::Activities => &[ACTIVITIES],
            EmojiCategory::Random => &[FACES, FOOD, ANIMALS, ACTIVITIES],
        }
    }

    /// Number of glyphs eligible for this category
    pub fn glyph_count(self) -> usize {
        self.sets().iter().map(|set| set.len()).sum()
    }

    /// Iterate every eligible glyph
    pub fn glyphs(self) -> impl Iterator<Item = &'static str> {
        self.sets().iter().flat_map(|set| set.iter().copied())
    }

    /// Whether `glyph` belongs to this category
    pub fn contains(self, glyph: &str) -> bool {
        self.glyphs().any(|g| g == glyph)
    }

    /// Pick one glyph uniformly at random over the whole (combined) set
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        let mut index = rng.gen_range(0..self.glyph_count());
        for set in self.sets() {
            if index < set.len() {
                return set[index];
            }
            index -= set.len();
        }
        // Unreachable: index is always below the combined length
        FACES[0]
    }

    /// Selector label with a representative glyph
    pub fn label(self) -> &'static str {
        match self {
            EmojiCategory::Faces => "😀 Faces",
            EmojiCategory::Food => "🍔 Food",
            EmojiCategory::Animals => "🦊 Animals",
            EmojiCategory::Activities => "⚽ Sports",
            EmojiCategory::Random => "🎲 Mixed",
        }
    }
}
