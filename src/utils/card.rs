//! Payment card number validation.
//!
//! Card numbers are only checked and never stored; callers keep at most the
//! last four digits for receipts.

/// Validates a card number with the Luhn checksum.
///
/// Accepts digits, spaces and dashes; any other character fails validation.
/// Card numbers must be 12 to 19 digits long.
pub fn is_valid_card_number(input: &str) -> bool {
    let mut digits = Vec::with_capacity(19);
    for c in input.chars() {
        match c {
            '0'..='9' => digits.push(c as u32 - '0' as u32),
            ' ' | '-' => {}
            _ => return false,
        }
    }

    if digits.len() < 12 || digits.len() > 19 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Returns the last four digits of a card number for storage on a receipt.
pub fn card_last_four(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return None;
    }
    Some(digits[digits.len() - 4..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_valid_numbers() {
        // Standard test card numbers
        assert!(is_valid_card_number("4539148803436467"));
        assert!(is_valid_card_number("4111111111111111"));
        assert!(is_valid_card_number("5500005555555559"));
    }

    #[test]
    fn test_separators_are_ignored() {
        assert!(is_valid_card_number("4111 1111 1111 1111"));
        assert!(is_valid_card_number("4111-1111-1111-1111"));
    }

    #[test]
    fn test_invalid_checksum_rejected() {
        assert!(!is_valid_card_number("4111111111111112"));
        assert!(!is_valid_card_number("1234567812345678"));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(!is_valid_card_number("4111x11111111111"));
        assert!(!is_valid_card_number(""));
    }

    #[test]
    fn test_length_bounds() {
        assert!(!is_valid_card_number("42"));
        assert!(!is_valid_card_number(&"4".repeat(20)));
    }

    #[test]
    fn test_last_four() {
        assert_eq!(
            card_last_four("4111-1111-1111-1111"),
            Some("1111".to_string())
        );
        assert_eq!(card_last_four("4467"), Some("4467".to_string()));
        assert_eq!(card_last_four("42"), None);
    }

    proptest! {
        /// Changing any single digit of a valid number breaks the checksum.
        #[test]
        fn prop_single_digit_mutation_fails(position in 0usize..16, delta in 1u32..10) {
            let valid = "4539148803436467";
            let mut digits: Vec<u32> =
                valid.chars().map(|c| c as u32 - '0' as u32).collect();
            digits[position] = (digits[position] + delta) % 10;
            let mutated: String =
                digits.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect();

            if mutated != valid {
                prop_assert!(!is_valid_card_number(&mutated));
            }
        }
    }
}
