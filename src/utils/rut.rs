//! Chilean RUT validation.
//!
//! A RUT is a national identifier of the form "12.345.678-5": a number plus
//! a verifier computed with the modulo-11 algorithm. The verifier digit can
//! be "K" when the remainder maps to 10.

/// Validates a RUT string, accepting optional thousand separators ('.') and
/// requiring the verifier after a '-' (e.g. "12.345.678-5" or "12345678-5").
pub fn is_valid_rut(input: &str) -> bool {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != '.')
        .collect::<String>()
        .to_uppercase();

    let Some((number, verifier)) = cleaned.rsplit_once('-') else {
        return false;
    };

    if verifier.len() != 1 || number.is_empty() || number.len() > 9 {
        return false;
    }

    if !number.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let Ok(number) = number.parse::<u64>() else {
        return false;
    };

    verifier.chars().next() == Some(compute_verifier(number))
}

/// Computes the modulo-11 verifier character for the numeric part of a RUT.
pub fn compute_verifier(mut number: u64) -> char {
    let mut sum: u64 = 0;
    let mut factor: u64 = 2;

    while number > 0 {
        sum += (number % 10) * factor;
        number /= 10;
        factor = if factor == 7 { 2 } else { factor + 1 };
    }

    match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        digit => char::from_digit(digit as u32, 10).unwrap_or('0'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_verifiers() {
        assert_eq!(compute_verifier(12345678), '5');
        assert_eq!(compute_verifier(11111111), '1');
        assert_eq!(compute_verifier(20347878), 'K');
    }

    #[test]
    fn test_valid_formats() {
        assert!(is_valid_rut("12.345.678-5"));
        assert!(is_valid_rut("12345678-5"));
        assert!(is_valid_rut("20347878-k"));
        assert!(is_valid_rut("20.347.878-K"));
    }

    #[test]
    fn test_wrong_verifier_rejected() {
        assert!(!is_valid_rut("12.345.678-6"));
        assert!(!is_valid_rut("11111111-2"));
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(!is_valid_rut(""));
        assert!(!is_valid_rut("12345678"));
        assert!(!is_valid_rut("12345678-"));
        assert!(!is_valid_rut("-5"));
        assert!(!is_valid_rut("abc-5"));
        assert!(!is_valid_rut("12345678-55"));
        assert!(!is_valid_rut("1234567890-5"));
    }

    #[test]
    fn test_generated_verifiers_always_validate() {
        for number in [1u64, 999, 5_000_000, 12_345_678, 99_999_999] {
            let rut = format!("{}-{}", number, compute_verifier(number));
            assert!(is_valid_rut(&rut), "expected {} to validate", rut);
        }
    }
}
