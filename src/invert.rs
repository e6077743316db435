/// Reverse `text` by Unicode scalar value, keeping multi-byte characters intact.
pub fn invert(text: &str) -> String {
    text.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct CharClasses {
        letters: usize,
        digits: usize,
        spaces: usize,
        other: usize,
    }

    fn classify(s: &str) -> CharClasses {
        let mut classes = CharClasses::default();
        for c in s.chars() {
            if c.is_alphabetic() {
                classes.letters += 1;
            } else if c.is_numeric() {
                classes.digits += 1;
            } else if c.is_whitespace() {
                classes.spaces += 1;
            } else {
                classes.other += 1;
            }
        }
        classes
    }

    const SAMPLES: &[&str] = &[
        "",
        "a",
        "hello",
        "Hello World!",
        "123456789",
        "!@#$%^&*()",
        "привет мир 👋",
    ];

    #[test]
    fn test_known_inversions() {
        let cases = [
            ("", ""),
            ("a", "a"),
            ("hello", "olleh"),
            ("Hello World", "dlroW olleH"),
            ("abc123", "321cba"),
            ("hello!@#$%", "%$#@!olleh"),
            ("привет мир", "рим тевирп"),
            ("Hello 👋 World 🌍", "🌍 dlroW 👋 olleH"),
            ("racecar", "racecar"),
            ("AbCdEf", "fEdCbA"),
        ];
        for (input, expected) in cases {
            assert_eq!(invert(input), expected, "invert({input:?})");
        }
    }

    #[test]
    fn test_double_inversion_is_identity() {
        for input in SAMPLES {
            assert_eq!(invert(&invert(input)), *input);
        }
    }

    #[test]
    fn test_length_preserved_in_chars_and_bytes() {
        for input in SAMPLES {
            let inverted = invert(input);
            assert_eq!(inverted.chars().count(), input.chars().count());
            assert_eq!(inverted.len(), input.len());
        }
    }

    #[test]
    fn test_character_classes_preserved() {
        for input in SAMPLES {
            assert_eq!(classify(&invert(input)), classify(input), "{input:?}");
        }
    }
}
