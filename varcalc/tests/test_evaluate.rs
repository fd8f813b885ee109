use anyhow::Result;
use approx::assert_abs_diff_eq;
use varcalc::prelude::*;

fn expect_error(input: &str, bindings: &mut Bindings, expected: CalcError) {
    let err = evaluate(input, bindings).unwrap_err();
    assert!(
        is_specific_calc_error(&err, &expected),
        "input '{}' gave '{}', expected '{}'",
        input,
        err,
        expected
    );
}

#[test]
fn test_precedence_and_parentheses() -> Result<()> {
    let mut bindings = Bindings::new();
    assert_abs_diff_eq!(evaluate("(10 + 2) * 5 / 2 - 10", &mut bindings)?, 20.0);
    assert_abs_diff_eq!(evaluate("2 + 3 * 4 - 6 / 2", &mut bindings)?, 11.0);
    assert_abs_diff_eq!(evaluate("(2 + 3) * (4 - 6) / 2", &mut bindings)?, -5.0);
    assert_abs_diff_eq!(evaluate("100 / 10 / 5", &mut bindings)?, 2.0);
    assert_abs_diff_eq!(evaluate("1 - 2 + 3", &mut bindings)?, 2.0);
    Ok(())
}

#[test]
fn test_division_by_zero() {
    let mut bindings = Bindings::new();
    expect_error("10 / (5 - 5)", &mut bindings, CalcError::DivisionByZero);
    expect_error("0 / 0", &mut bindings, CalcError::DivisionByZero);
    expect_error("1 / 0.0", &mut bindings, CalcError::DivisionByZero);
}

#[test]
fn test_unknown_variable() {
    let mut bindings = Bindings::new();
    expect_error(
        "z + 5",
        &mut bindings,
        CalcError::UnknownVariable("z".to_string()),
    );
}

#[test]
fn test_invalid_variable_name() {
    let mut bindings = Bindings::new();
    let err = evaluate("1var = 5", &mut bindings).unwrap_err();
    assert_eq!(error_kind(&err), Some(ErrorKind::InvalidName));
    assert_eq!(err.to_string(), "Invalid variable name: 1var");
    assert!(bindings.is_empty());
}

#[test]
fn test_invalid_characters_and_parentheses() {
    let mut bindings = Bindings::new();
    for (input, c) in [
        ("2 ^ 3", '^'),
        ("x_1 = 2", '_'),
        ("4 % 2", '%'),
        ("f(2)!", '!'),
        ("\u{a0}1 + 2", '\u{a0}'),
    ] {
        expect_error(input, &mut bindings, CalcError::InvalidCharacter(c));
    }
    expect_error("(2 + 3", &mut bindings, CalcError::MismatchedParentheses);
    expect_error("2 + 3)", &mut bindings, CalcError::MismatchedParentheses);
}

#[test]
fn test_reassignment() -> Result<()> {
    let mut bindings = Bindings::new();
    evaluate("x = 5", &mut bindings)?;
    evaluate("x = 5", &mut bindings)?;
    assert_eq!(bindings.get("x"), Some(5.0));
    evaluate("x = 10", &mut bindings)?;
    assert_eq!(bindings.get("x"), Some(10.0));
    assert_eq!(bindings.len(), 1);
    Ok(())
}

#[test]
fn test_multi_statement() -> Result<()> {
    let mut bindings = Bindings::new();
    assert_eq!(evaluate("a = 5; b = a * 2; b + 1", &mut bindings)?, 11.0);
    let mut entries: Vec<(&str, f64)> = bindings.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    assert_eq!(entries, vec![("a", 5.0), ("b", 10.0)]);
    Ok(())
}

#[test]
fn test_tables_are_not_shared() -> Result<()> {
    let mut table_a = Bindings::new();
    let mut table_b = Bindings::new();
    evaluate("x = 5", &mut table_a)?;
    expect_error(
        "x + 1",
        &mut table_b,
        CalcError::UnknownVariable("x".to_string()),
    );
    assert_eq!(evaluate("x + 1", &mut table_a)?, 6.0);
    Ok(())
}

#[test]
fn test_clear() -> Result<()> {
    let mut bindings = Bindings::new();
    evaluate("x = 1; y = 2", &mut bindings)?;
    bindings.clear();
    expect_error(
        "x",
        &mut bindings,
        CalcError::UnknownVariable("x".to_string()),
    );
    Ok(())
}
