//! Fixed letter tables of the trigger text format
//!
//! These mappings are historical and must be reproduced exactly; they are
//! not derivable from general rules. Size letters deliberately avoid the
//! hex digits A-F because they follow a hex payload introducer.

use super::model::{ConditionFlag, MemSize};

/// Map a flag-prefix letter to its condition flag.
///
/// Letters are accepted case-insensitively. A letter is only a flag prefix
/// when the character after it is `:`; that check belongs to the caller.
pub fn flag_for_letter(letter: char) -> Option<ConditionFlag> {
    match letter.to_ascii_uppercase() {
        'P' => Some(ConditionFlag::PauseIf),
        'R' => Some(ConditionFlag::ResetIf),
        'A' => Some(ConditionFlag::AddSource),
        'B' => Some(ConditionFlag::SubSource),
        'C' => Some(ConditionFlag::AddHits),
        'D' => Some(ConditionFlag::SubHits),
        'N' => Some(ConditionFlag::AndNext),
        'O' => Some(ConditionFlag::OrNext),
        'M' => Some(ConditionFlag::Measured),
        'G' => Some(ConditionFlag::MeasuredIf),
        'T' => Some(ConditionFlag::Trigger),
        'I' => Some(ConditionFlag::AddAddress),
        'Z' => Some(ConditionFlag::ResetNextIf),
        _ => None,
    }
}

/// Canonical upper-case letter for a flag; `None` for Standard.
pub fn letter_for_flag(flag: ConditionFlag) -> Option<char> {
    match flag {
        ConditionFlag::Standard => None,
        ConditionFlag::PauseIf => Some('P'),
        ConditionFlag::ResetIf => Some('R'),
        ConditionFlag::AddSource => Some('A'),
        ConditionFlag::SubSource => Some('B'),
        ConditionFlag::AddHits => Some('C'),
        ConditionFlag::SubHits => Some('D'),
        ConditionFlag::AndNext => Some('N'),
        ConditionFlag::OrNext => Some('O'),
        ConditionFlag::Measured => Some('M'),
        ConditionFlag::MeasuredIf => Some('G'),
        ConditionFlag::Trigger => Some('T'),
        ConditionFlag::AddAddress => Some('I'),
        ConditionFlag::ResetNextIf => Some('Z'),
    }
}

/// Whether a character can open a flag prefix.
///
/// Used by the record codec's delimiter scan: a `:` preceded by one of
/// these letters is flag content, not a field separator.
pub fn is_flag_letter(letter: char) -> bool {
    flag_for_letter(letter).is_some()
}

/// Map a size letter to its width.
///
/// The 16-bit width has no letter; historical serializers wrote a space,
/// which the operand reader consumes separately.
pub fn size_for_letter(letter: char) -> Option<MemSize> {
    match letter.to_ascii_uppercase() {
        'M' => Some(MemSize::Bit0),
        'N' => Some(MemSize::Bit1),
        'O' => Some(MemSize::Bit2),
        'P' => Some(MemSize::Bit3),
        'Q' => Some(MemSize::Bit4),
        'R' => Some(MemSize::Bit5),
        'S' => Some(MemSize::Bit6),
        'T' => Some(MemSize::Bit7),
        'L' => Some(MemSize::NibbleLower),
        'U' => Some(MemSize::NibbleUpper),
        'H' => Some(MemSize::EightBit),
        'W' => Some(MemSize::TwentyFourBit),
        'X' => Some(MemSize::ThirtyTwoBit),
        'K' => Some(MemSize::BitCount),
        _ => None,
    }
}

/// Canonical size letter; `None` for 16-bit (implicit) and `Text`.
pub fn letter_for_size(size: MemSize) -> Option<char> {
    match size {
        MemSize::Bit0 => Some('M'),
        MemSize::Bit1 => Some('N'),
        MemSize::Bit2 => Some('O'),
        MemSize::Bit3 => Some('P'),
        MemSize::Bit4 => Some('Q'),
        MemSize::Bit5 => Some('R'),
        MemSize::Bit6 => Some('S'),
        MemSize::Bit7 => Some('T'),
        MemSize::NibbleLower => Some('L'),
        MemSize::NibbleUpper => Some('U'),
        MemSize::EightBit => Some('H'),
        MemSize::TwentyFourBit => Some('W'),
        MemSize::ThirtyTwoBit => Some('X'),
        MemSize::BitCount => Some('K'),
        MemSize::SixteenBit | MemSize::Text => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FLAGS: [ConditionFlag; 14] = [
        ConditionFlag::Standard,
        ConditionFlag::PauseIf,
        ConditionFlag::ResetIf,
        ConditionFlag::AddSource,
        ConditionFlag::SubSource,
        ConditionFlag::AddHits,
        ConditionFlag::SubHits,
        ConditionFlag::AndNext,
        ConditionFlag::OrNext,
        ConditionFlag::Measured,
        ConditionFlag::MeasuredIf,
        ConditionFlag::Trigger,
        ConditionFlag::AddAddress,
        ConditionFlag::ResetNextIf,
    ];

    const ALL_SIZES: [MemSize; 16] = [
        MemSize::Bit0,
        MemSize::Bit1,
        MemSize::Bit2,
        MemSize::Bit3,
        MemSize::Bit4,
        MemSize::Bit5,
        MemSize::Bit6,
        MemSize::Bit7,
        MemSize::NibbleLower,
        MemSize::NibbleUpper,
        MemSize::EightBit,
        MemSize::SixteenBit,
        MemSize::TwentyFourBit,
        MemSize::ThirtyTwoBit,
        MemSize::BitCount,
        MemSize::Text,
    ];

    #[test]
    fn test_flag_letters_round_trip() {
        for flag in ALL_FLAGS {
            match letter_for_flag(flag) {
                Some(letter) => {
                    assert_eq!(flag_for_letter(letter), Some(flag));
                    assert_eq!(flag_for_letter(letter.to_ascii_lowercase()), Some(flag));
                }
                None => assert_eq!(flag, ConditionFlag::Standard),
            }
        }
    }

    #[test]
    fn test_exact_flag_letters() {
        assert_eq!(flag_for_letter('A'), Some(ConditionFlag::AddSource));
        assert_eq!(flag_for_letter('B'), Some(ConditionFlag::SubSource));
        assert_eq!(flag_for_letter('C'), Some(ConditionFlag::AddHits));
        assert_eq!(flag_for_letter('D'), Some(ConditionFlag::SubHits));
        assert_eq!(flag_for_letter('N'), Some(ConditionFlag::AndNext));
        assert_eq!(flag_for_letter('O'), Some(ConditionFlag::OrNext));
        assert_eq!(flag_for_letter('Z'), Some(ConditionFlag::ResetNextIf));
        assert_eq!(flag_for_letter('P'), Some(ConditionFlag::PauseIf));
        assert_eq!(flag_for_letter('R'), Some(ConditionFlag::ResetIf));
        assert_eq!(flag_for_letter('M'), Some(ConditionFlag::Measured));
        assert_eq!(flag_for_letter('G'), Some(ConditionFlag::MeasuredIf));
        assert_eq!(flag_for_letter('T'), Some(ConditionFlag::Trigger));
        assert_eq!(flag_for_letter('I'), Some(ConditionFlag::AddAddress));
        assert_eq!(flag_for_letter('E'), None);
        assert_eq!(flag_for_letter('0'), None);
    }

    #[test]
    fn test_size_letters_round_trip() {
        for size in ALL_SIZES {
            match letter_for_size(size) {
                Some(letter) => {
                    assert_eq!(size_for_letter(letter), Some(size));
                    assert_eq!(size_for_letter(letter.to_ascii_lowercase()), Some(size));
                }
                None => assert!(matches!(size, MemSize::SixteenBit | MemSize::Text)),
            }
        }
    }

    #[test]
    fn test_size_letters_avoid_hex_digits() {
        for letter in ['A', 'B', 'C', 'D', 'E', 'F'] {
            assert_eq!(size_for_letter(letter), None);
        }
    }

    #[test]
    fn test_is_flag_letter() {
        assert!(is_flag_letter('A'));
        assert!(is_flag_letter('a'));
        assert!(is_flag_letter('z'));
        assert!(!is_flag_letter(':'));
        assert!(!is_flag_letter('5'));
    }
}
