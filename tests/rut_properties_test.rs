//! Properties of the RUT check-digit validator over generated bodies.

use flota_validation::core::rut::compute_check_digit;
use flota_validation::{validate_rut, Rut};

const CHECK_CHARS: [char; 11] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'K'];

/// Spread of 7- and 8-digit bodies, including both range ends.
fn sample_bodies() -> Vec<u32> {
    let mut bodies: Vec<u32> = (1_000_000..=99_999_999).step_by(1_234_567).collect();
    bodies.extend((1_000_000..10_000_000).step_by(97_531));
    bodies.extend([1_000_000, 9_999_999, 10_000_000, 99_999_999]);
    bodies
}

#[test]
fn test_generated_ruts_are_valid() {
    for body in sample_bodies() {
        let rut = Rut::from_body(body).unwrap();
        let compact = format!("{}{}", body, rut.check_digit());
        assert!(validate_rut(&compact), "rejected {}", compact);
        assert!(validate_rut(&rut.compact()), "rejected {}", rut.compact());
        assert!(validate_rut(&rut.to_string()), "rejected {}", rut);
        assert_eq!(compute_check_digit(&body.to_string()), Some(rut.check_digit()));
    }
}

#[test]
fn test_separators_do_not_change_result() {
    for body in sample_bodies() {
        let rut = Rut::from_body(body).unwrap();
        let digits = body.to_string();

        for position in 0..=digits.len() {
            let mut dotted = digits.clone();
            dotted.insert(position, '.');
            let with_dot = format!("{}{}", dotted, rut.check_digit());
            let with_dot_and_dash = format!("{}-{}", dotted, rut.check_digit());
            assert!(validate_rut(&with_dot), "rejected {}", with_dot);
            assert!(validate_rut(&with_dot_and_dash), "rejected {}", with_dot_and_dash);
        }

        let every_other: String = digits
            .chars()
            .flat_map(|c| [c, '.'])
            .collect();
        assert!(validate_rut(&format!("{}-{}", every_other, rut.check_digit())));
    }
}

#[test]
fn test_any_other_check_char_is_invalid() {
    for body in sample_bodies() {
        let rut = Rut::from_body(body).unwrap();
        for candidate in CHECK_CHARS.into_iter().filter(|c| *c != rut.check_digit()) {
            let input = format!("{}-{}", body, candidate);
            assert!(!validate_rut(&input), "accepted {}", input);
        }
    }
}

#[test]
fn test_k_is_case_insensitive() {
    let k_bodies: Vec<u32> = sample_bodies()
        .into_iter()
        .filter(|b| Rut::from_body(*b).unwrap().check_digit() == 'K')
        .chain([1_000_005])
        .collect();

    for body in k_bodies {
        assert!(validate_rut(&format!("{}-K", body)));
        assert!(validate_rut(&format!("{}-k", body)));
    }
}

#[test]
fn test_reference_table() {
    let cases = [
        ("76086428-5", true),
        ("76.086.428-5", true),
        ("11.111.111-1", true),
        ("11111111-2", false),
        ("12345678-5", true),
        ("12345678-K", false),
        ("1000005-K", true),
        ("1000030-0", true),
        ("", false),
        ("abc", false),
        ("123", false),
        ("12345678", false),
        ("12345678-", false),
        ("12 345 678-5", false),
    ];

    for (input, expected) in cases {
        assert_eq!(validate_rut(input), expected, "input {:?}", input);
    }
}

#[test]
fn test_idempotent() {
    for input in ["76086428-5", "76086428-4", "garbage"] {
        assert_eq!(validate_rut(input), validate_rut(input));
    }
}
