//! ROT13 and Caesar letter-rotation ciphers
//!
//! Rotation preserves case and passes non-letters through, so these
//! transforms are total in both directions. ROT13 is Caesar(13) and
//! therefore its own inverse.

/// Rotate letters forward by `shift` positions
pub fn caesar(text: &str, shift: u8) -> String {
    let shift = shift % 26;
    text.chars()
        .map(|c| match c {
            'a'..='z' => (((c as u8 - b'a' + shift) % 26) + b'a') as char,
            'A'..='Z' => (((c as u8 - b'A' + shift) % 26) + b'A') as char,
            _ => c,
        })
        .collect()
}

pub fn rot13(text: &str) -> String {
    caesar(text, 13)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rot13_known_value() {
        assert_eq!(rot13("Hello"), "Uryyb");
        assert_eq!(rot13("Uryyb"), "Hello");
    }

    #[test]
    fn test_rot13_is_self_inverse() {
        let text = "The quick brown FOX, 123!";
        assert_eq!(rot13(&rot13(text)), text);
    }

    #[test]
    fn test_caesar_preserves_case_and_punctuation() {
        assert_eq!(caesar("Abc, xyz!", 3), "Def, abc!");
    }

    #[test]
    fn test_caesar_wraps_large_shift() {
        assert_eq!(caesar("abc", 29), caesar("abc", 3));
        assert_eq!(caesar("abc", 0), "abc");
    }
}
