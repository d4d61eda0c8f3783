//! Document number tests
//!
//! Cross-checks the filters against the validators for generated documents.

use formctrl_validators::{Cnpj, Cpf, Filter, Pis, Validator, digits};
use proptest::prelude::*;
use rstest::rstest;

fn check_digit(numbers: &[u32], weights: &[u32]) -> u32 {
	let sum: u32 = numbers.iter().zip(weights).map(|(d, w)| d * w).sum();
	let remainder = sum % 11;
	if remainder < 2 { 0 } else { 11 - remainder }
}

fn build_cpf(base: &[u32]) -> String {
	let mut numbers = base.to_vec();
	numbers.push(check_digit(&numbers, &[10, 9, 8, 7, 6, 5, 4, 3, 2]));
	numbers.push(check_digit(&numbers, &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2]));
	numbers.iter().map(|d| d.to_string()).collect()
}

fn build_cnpj(base: &[u32]) -> String {
	let mut numbers = base.to_vec();
	numbers.push(check_digit(&numbers, &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]));
	numbers.push(check_digit(
		&numbers,
		&[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2],
	));
	numbers.iter().map(|d| d.to_string()).collect()
}

#[rstest]
fn test_known_documents() {
	assert_eq!(build_cpf(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), "52998224725");
	assert_eq!(
		build_cnpj(&[1, 1, 2, 2, 2, 3, 3, 3, 0, 0, 0, 1]),
		"11222333000181"
	);
	assert!(Pis.is_valid("12054485570"));
}

#[rstest]
fn test_filter_output_validates_like_raw_digits() {
	for raw in ["52998224725", "11222333000181"] {
		let cpf_masked = Cpf.filter(raw);
		let cnpj_masked = Cnpj.filter(raw);
		assert_eq!(Cpf.is_valid(raw), Cpf.is_valid(&cpf_masked));
		assert_eq!(Cnpj.is_valid(raw), Cnpj.is_valid(&cnpj_masked));
	}
}

fn not_repeated(base: &[u32]) -> bool {
	base.iter().any(|d| *d != base[0])
}

proptest! {
	#[test]
	fn prop_generated_cpf_is_valid(base in proptest::collection::vec(0u32..10, 9)) {
		prop_assume!(not_repeated(&base));
		let cpf = build_cpf(&base);
		prop_assert!(Cpf.is_valid(&cpf));
		prop_assert!(Cpf.is_valid(&Cpf.filter(&cpf)));
		prop_assert_eq!(digits(&Cpf.filter(&cpf)), cpf);
	}

	#[test]
	fn prop_generated_cnpj_is_valid(base in proptest::collection::vec(0u32..10, 12)) {
		prop_assume!(not_repeated(&base));
		let cnpj = build_cnpj(&base);
		prop_assert!(Cnpj.is_valid(&cnpj));
		prop_assert_eq!(Cnpj::format(&cnpj), Some(Cnpj.filter(&cnpj)));
	}

	#[test]
	fn prop_cpf_single_digit_change_is_rejected(
		base in proptest::collection::vec(0u32..10, 9),
		bump in 1u32..10,
	) {
		prop_assume!(not_repeated(&base));
		let cpf = build_cpf(&base);
		let last = cpf.chars().last().and_then(|c| c.to_digit(10)).unwrap();
		let tampered = format!("{}{}", &cpf[..10], (last + bump) % 10);
		prop_assert!(!Cpf.is_valid(&tampered));
	}
}
