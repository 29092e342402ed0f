//! Morse code codec
//!
//! Decoding maps whitespace-separated `.`/`-` groups through the
//! standard table; unknown groups pass through unchanged (lossy, not
//! a failure). Word gaps are written as `/`.

const MORSE_TABLE: [(&str, char); 36] = [
    (".-", 'A'),
    ("-...", 'B'),
    ("-.-.", 'C'),
    ("-..", 'D'),
    (".", 'E'),
    ("..-.", 'F'),
    ("--.", 'G'),
    ("....", 'H'),
    ("..", 'I'),
    (".---", 'J'),
    ("-.-", 'K'),
    (".-..", 'L'),
    ("--", 'M'),
    ("-.", 'N'),
    ("---", 'O'),
    (".--.", 'P'),
    ("--.-", 'Q'),
    (".-.", 'R'),
    ("...", 'S'),
    ("-", 'T'),
    ("..-", 'U'),
    ("...-", 'V'),
    (".--", 'W'),
    ("-..-", 'X'),
    ("-.--", 'Y'),
    ("--..", 'Z'),
    ("-----", '0'),
    (".----", '1'),
    ("..---", '2'),
    ("...--", '3'),
    ("....-", '4'),
    (".....", '5'),
    ("-....", '6'),
    ("--...", '7'),
    ("---..", '8'),
    ("----.", '9'),
];

fn code_for(c: char) -> Option<&'static str> {
    let upper = c.to_ascii_uppercase();
    MORSE_TABLE
        .iter()
        .find(|(_, letter)| *letter == upper)
        .map(|(code, _)| *code)
}

fn letter_for(code: &str) -> Option<char> {
    MORSE_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, letter)| *letter)
}

/// Encode letters and digits as code groups; spaces become `/` and
/// characters without a code pass through as their own token.
pub fn encode(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c == ' ' {
                "/".to_string()
            } else {
                code_for(c)
                    .map(str::to_string)
                    .unwrap_or_else(|| c.to_string())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode whitespace-separated code groups; unknown groups (including
/// the `/` word gap) pass through unchanged.
pub fn decode(text: &str) -> String {
    text.split_whitespace()
        .map(|token| {
            letter_for(token)
                .map(String::from)
                .unwrap_or_else(|| token.to_string())
        })
        .collect()
}
