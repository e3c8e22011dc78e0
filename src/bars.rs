//! Mapping of characters onto the 65 printed bars.
//!
//! Each bar reads one bit from one character for its ascender and one bit
//! from another character for its descender. Which character and which bit
//! is fixed by USPS-B-3200 and reproduced in the tables below.

use std::fmt;
use std::str::FromStr;

use crate::error::InputFormatError;
use crate::payload::Characters;

/// Number of bars in a barcode.
pub const BAR_COUNT: usize = 65;

/// Character holding each bar's ascender bit.
pub const ASCENDER_CHARACTER: [u8; BAR_COUNT] = [
    4, 0, 2, 6, 3, 5, 1, 9, 8, 7, 1, 2, 0, 6, 4, 8, 2, 9, 5, 3, 0, 1, 3, 7, 4, 6, 8, 9, 2, 0, 5, 1,
    9, 4, 3, 8, 6, 7, 1, 2, 4, 3, 9, 5, 7, 8, 3, 0, 2, 1, 4, 0, 9, 1, 7, 0, 2, 4, 6, 3, 7, 1, 9, 5,
    8,
];

/// Character holding each bar's descender bit.
pub const DESCENDER_CHARACTER: [u8; BAR_COUNT] = [
    7, 1, 9, 5, 8, 0, 2, 4, 6, 3, 5, 8, 9, 7, 3, 0, 6, 1, 7, 4, 6, 8, 9, 2, 5, 1, 7, 5, 4, 3, 8, 7,
    6, 0, 2, 5, 4, 9, 3, 0, 1, 6, 8, 2, 0, 4, 5, 9, 6, 7, 5, 2, 6, 3, 8, 5, 1, 9, 8, 7, 4, 0, 2, 6,
    3,
];

/// Bit of the ascender character read by each bar.
pub const ASCENDER_BIT: [u8; BAR_COUNT] = [
    3, 0, 8, 11, 1, 12, 8, 11, 10, 6, 4, 12, 2, 7, 9, 6, 7, 9, 2, 8, 4, 0, 12, 7, 10, 9, 0, 7, 10,
    5, 7, 9, 6, 8, 2, 12, 1, 4, 2, 0, 1, 5, 4, 6, 12, 1, 0, 9, 4, 7, 5, 10, 2, 6, 9, 11, 2, 12, 6,
    7, 5, 11, 0, 3, 2,
];

/// Bit of the descender character read by each bar.
pub const DESCENDER_BIT: [u8; BAR_COUNT] = [
    2, 10, 12, 5, 9, 1, 5, 4, 3, 9, 11, 5, 10, 1, 6, 3, 4, 1, 10, 0, 2, 11, 8, 6, 1, 12, 3, 8, 6,
    4, 4, 11, 0, 6, 1, 9, 11, 5, 3, 7, 3, 10, 7, 11, 8, 2, 10, 3, 5, 8, 0, 3, 12, 11, 8, 4, 5, 1,
    3, 0, 7, 12, 9, 8, 10,
];

/// One printed bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarSymbol {
    /// Tracker plus the upper extension (`A`).
    Ascender,
    /// Tracker plus the lower extension (`D`).
    Descender,
    /// Both extensions (`F`).
    Full,
    /// Only the central tracker (`T`).
    Tracker,
}

impl BarSymbol {
    /// Picks the symbol from the ascender and descender bits.
    pub fn from_bits(ascender: bool, descender: bool) -> Self {
        match (ascender, descender) {
            (true, true) => BarSymbol::Full,
            (true, false) => BarSymbol::Ascender,
            (false, true) => BarSymbol::Descender,
            (false, false) => BarSymbol::Tracker,
        }
    }

    /// The letter conventionally used for this bar in IMB fonts.
    pub fn as_char(self) -> char {
        match self {
            BarSymbol::Ascender => 'A',
            BarSymbol::Descender => 'D',
            BarSymbol::Full => 'F',
            BarSymbol::Tracker => 'T',
        }
    }

    /// Parses one of `A`, `D`, `F`, `T`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(BarSymbol::Ascender),
            'D' => Some(BarSymbol::Descender),
            'F' => Some(BarSymbol::Full),
            'T' => Some(BarSymbol::Tracker),
            _ => None,
        }
    }

    /// Whether the bar extends upwards.
    pub fn has_ascender(self) -> bool {
        matches!(self, BarSymbol::Ascender | BarSymbol::Full)
    }

    /// Whether the bar extends downwards.
    pub fn has_descender(self) -> bool {
        matches!(self, BarSymbol::Descender | BarSymbol::Full)
    }
}

impl fmt::Display for BarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The 65 bars of a barcode, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bars([BarSymbol; BAR_COUNT]);

impl Bars {
    /// Builds the bars for ten characters.
    pub fn from_characters(characters: &Characters) -> Self {
        let mut bars = [BarSymbol::Tracker; BAR_COUNT];

        for (i, bar) in bars.iter_mut().enumerate() {
            let ascender = bit_set(characters, ASCENDER_CHARACTER[i], ASCENDER_BIT[i]);
            let descender = bit_set(characters, DESCENDER_CHARACTER[i], DESCENDER_BIT[i]);
            *bar = BarSymbol::from_bits(ascender, descender);
        }

        Bars(bars)
    }

    /// The bar symbols.
    pub fn symbols(&self) -> &[BarSymbol; BAR_COUNT] {
        &self.0
    }

    /// Iterates over the bars, left to right.
    pub fn iter(&self) -> impl Iterator<Item = BarSymbol> + '_ {
        self.0.iter().copied()
    }

    /// Number of bars of the given kind.
    pub fn count(&self, symbol: BarSymbol) -> usize {
        self.0.iter().filter(|&&bar| bar == symbol).count()
    }
}

fn bit_set(characters: &Characters, character: u8, bit: u8) -> bool {
    characters[usize::from(character)] & (1 << bit) != 0
}

impl fmt::Display for Bars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bar in self.0 {
            write!(f, "{}", bar)?;
        }
        Ok(())
    }
}

impl FromStr for Bars {
    type Err = InputFormatError;

    /// Reads a stored `A/D/F/T` string back into bars.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.chars().count();
        if length != BAR_COUNT {
            return Err(InputFormatError::InvalidBarCount { length });
        }

        let mut bars = [BarSymbol::Tracker; BAR_COUNT];
        for (position, (bar, c)) in bars.iter_mut().zip(s.chars()).enumerate() {
            *bar = BarSymbol::from_char(c)
                .ok_or(InputFormatError::InvalidBarSymbol { position, found: c })?;
        }
        Ok(Bars(bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_every_bit_once() {
        let mut seen = [[false; 13]; 10];
        for i in 0..BAR_COUNT {
            for (character, bit) in [
                (ASCENDER_CHARACTER[i], ASCENDER_BIT[i]),
                (DESCENDER_CHARACTER[i], DESCENDER_BIT[i]),
            ] {
                let slot = &mut seen[usize::from(character)][usize::from(bit)];
                assert!(!*slot, "character {} bit {} used twice", character, bit);
                *slot = true;
            }
        }
        assert!(seen.iter().flatten().all(|&used| used));
    }

    #[test]
    fn test_symbol_from_bits() {
        assert_eq!(BarSymbol::from_bits(true, true), BarSymbol::Full);
        assert_eq!(BarSymbol::from_bits(true, false), BarSymbol::Ascender);
        assert_eq!(BarSymbol::from_bits(false, true), BarSymbol::Descender);
        assert_eq!(BarSymbol::from_bits(false, false), BarSymbol::Tracker);
    }

    #[test]
    fn test_symbol_chars() {
        for symbol in [
            BarSymbol::Ascender,
            BarSymbol::Descender,
            BarSymbol::Full,
            BarSymbol::Tracker,
        ] {
            assert_eq!(BarSymbol::from_char(symbol.as_char()), Some(symbol));
            assert_eq!(
                symbol.has_ascender() && symbol.has_descender(),
                symbol == BarSymbol::Full
            );
        }
        assert_eq!(BarSymbol::from_char('a'), None);
    }

    #[test]
    fn test_all_bits_clear_and_set() {
        let bars = Bars::from_characters(&[0; 10]);
        assert_eq!(bars.count(BarSymbol::Tracker), BAR_COUNT);

        let bars = Bars::from_characters(&[0x1FFF; 10]);
        assert_eq!(bars.count(BarSymbol::Full), BAR_COUNT);
        assert_eq!(bars.to_string(), "F".repeat(BAR_COUNT));
    }

    #[test]
    fn test_published_characters() {
        let characters = [
            0x1FE0, 0x001F, 0x001F, 0x001F, 0x0ADB, 0x01A3, 0x1BC3, 0x1838, 0x012B, 0x0076,
        ];
        let bars = Bars::from_characters(&characters);
        assert_eq!(
            bars.to_string(),
            "ATTFATTDTTADTAATTDTDTATTDAFDDFADFDFTFFFFFTATFAAAATDFFTDAADFTFDTDT"
        );
    }

    #[test]
    fn test_parse_bars() {
        let text = "ATTFATTDTTADTAATTDTDTATTDAFDDFADFDFTFFFFFTATFAAAATDFFTDAADFTFDTDT";
        let bars: Bars = text.parse().unwrap();
        assert_eq!(bars.to_string(), text);
        assert_eq!(bars.symbols()[0], BarSymbol::Ascender);
        assert_eq!(bars.iter().count(), BAR_COUNT);
        assert_eq!(
            bars.count(BarSymbol::Ascender)
                + bars.count(BarSymbol::Descender)
                + bars.count(BarSymbol::Full)
                + bars.count(BarSymbol::Tracker),
            BAR_COUNT
        );

        assert_eq!(
            "ATDF".parse::<Bars>(),
            Err(InputFormatError::InvalidBarCount { length: 4 })
        );

        let mut bad = text.to_string();
        bad.replace_range(10..11, "X");
        assert_eq!(
            bad.parse::<Bars>(),
            Err(InputFormatError::InvalidBarSymbol {
                position: 10,
                found: 'X'
            })
        );
    }
}
