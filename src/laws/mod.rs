//! Law Families
//!
//! Ready-made validators for the usual algebraic classes. Each law is
//! named after its property, so a failure report says which one broke.
//! Equality is passed in rather than taken from `PartialEq`, which lets a
//! class check a type's own notion of equality.

use crate::validators::{all, obey, Validator};

/// `a == a`
pub fn reflexivity<T: 'static, E>(eq: E) -> Validator<T>
where
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    obey("reflexivity", 1, move |xs: &[T]| eq(&xs[0], &xs[0]))
}

/// `a == b` iff `b == a`
pub fn symmetry<T: 'static, E>(eq: E) -> Validator<T>
where
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    obey("symmetry", 2, move |xs: &[T]| eq(&xs[0], &xs[1]) == eq(&xs[1], &xs[0]))
}

/// `a == b` and `b == c` imply `a == c`
pub fn transitivity<T: 'static, E>(eq: E) -> Validator<T>
where
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    obey("transitivity", 3, move |xs: &[T]| {
        !(eq(&xs[0], &xs[1]) && eq(&xs[1], &xs[2])) || eq(&xs[0], &xs[2])
    })
}

/// `(a <> b) <> c == a <> (b <> c)`
pub fn associativity<T: 'static, C, E>(combine: C, eq: E) -> Validator<T>
where
    C: Fn(&T, &T) -> T + Send + Sync + 'static,
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    obey("associativity", 3, move |xs: &[T]| {
        let left = combine(&combine(&xs[0], &xs[1]), &xs[2]);
        let right = combine(&xs[0], &combine(&xs[1], &xs[2]));
        eq(&left, &right)
    })
}

/// `a <> b == b <> a`
pub fn commutativity<T: 'static, C, E>(combine: C, eq: E) -> Validator<T>
where
    C: Fn(&T, &T) -> T + Send + Sync + 'static,
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    obey("commutativity", 2, move |xs: &[T]| {
        eq(&combine(&xs[0], &xs[1]), &combine(&xs[1], &xs[0]))
    })
}

/// `empty <> a == a`
pub fn left_identity<T: 'static, Z, C, E>(empty: Z, combine: C, eq: E) -> Validator<T>
where
    Z: Fn() -> T + Send + Sync + 'static,
    C: Fn(&T, &T) -> T + Send + Sync + 'static,
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    obey("left_identity", 1, move |xs: &[T]| {
        eq(&combine(&empty(), &xs[0]), &xs[0])
    })
}

/// `a <> empty == a`
pub fn right_identity<T: 'static, Z, C, E>(empty: Z, combine: C, eq: E) -> Validator<T>
where
    Z: Fn() -> T + Send + Sync + 'static,
    C: Fn(&T, &T) -> T + Send + Sync + 'static,
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    obey("right_identity", 1, move |xs: &[T]| {
        eq(&combine(&xs[0], &empty()), &xs[0])
    })
}

/// Reflexivity, symmetry and transitivity.
pub fn eq_laws<T: 'static, E>(eq: E) -> Validator<T>
where
    E: Fn(&T, &T) -> bool + Clone + Send + Sync + 'static,
{
    all([reflexivity(eq.clone()), symmetry(eq.clone()), transitivity(eq)])
}

/// The Eq laws using the type's own `PartialEq`.
pub fn partial_eq_laws<T: PartialEq + 'static>() -> Validator<T> {
    eq_laws(|a: &T, b: &T| a == b)
}

pub fn semigroup_laws<T: 'static, C, E>(combine: C, eq: E) -> Validator<T>
where
    C: Fn(&T, &T) -> T + Send + Sync + 'static,
    E: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    associativity(combine, eq)
}

/// Both identity laws. Associativity belongs to the Semigroup parent.
pub fn monoid_laws<T: 'static, Z, C, E>(empty: Z, combine: C, eq: E) -> Validator<T>
where
    Z: Fn() -> T + Clone + Send + Sync + 'static,
    C: Fn(&T, &T) -> T + Clone + Send + Sync + 'static,
    E: Fn(&T, &T) -> bool + Clone + Send + Sync + 'static,
{
    all([
        left_identity(empty.clone(), combine.clone(), eq.clone()),
        right_identity(empty, combine, eq),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use crate::generators::{continuous, discrete, RandomSource};

    fn config() -> ValidationConfig {
        ValidationConfig::new().with_random(RandomSource::seeded(11))
    }

    fn ints() -> crate::generators::Discrete<i64> {
        discrete("Ints", (-20..=20).collect()).with_random(RandomSource::seeded(5))
    }

    #[test]
    fn test_eq_laws_hold_for_partial_eq() {
        assert!(partial_eq_laws::<i64>().check(&ints(), &config()).is_success());
    }

    #[test]
    fn test_eq_laws_catch_a_broken_equality() {
        let result = eq_laws(|a: &i64, b: &i64| a != b).check(&ints(), &config());
        let message = result.message().unwrap();
        assert!(message.contains("reflexivity"));
    }

    #[test]
    fn test_nan_breaks_reflexivity() {
        let floats = continuous("NaN", 0, |_| f64::NAN);
        let result = reflexivity(|a: &f64, b: &f64| a == b).check(&floats, &config());
        assert!(result.message().unwrap().contains("Predicate reflexivity failed"));
    }

    #[test]
    fn test_addition_is_a_commutative_monoid() {
        let add = |a: &i64, b: &i64| a + b;
        let same = |a: &i64, b: &i64| a == b;
        let laws = all([
            semigroup_laws(add, same),
            commutativity(add, same),
            monoid_laws(|| 0, add, same),
        ]);
        assert!(laws.check(&ints(), &config()).is_success());
    }

    #[test]
    fn test_subtraction_is_not_a_semigroup() {
        let sub = |a: &i64, b: &i64| a - b;
        let same = |a: &i64, b: &i64| a == b;
        let result = all([semigroup_laws(sub, same), commutativity(sub, same)])
            .check(&ints(), &config());
        let message = result.message().unwrap();
        assert!(message.contains("associativity"));
        assert!(message.contains("commutativity"));
    }

    #[test]
    fn test_wrong_identity_is_caught() {
        let mul = |a: &i64, b: &i64| a * b;
        let same = |a: &i64, b: &i64| a == b;
        let result = monoid_laws(|| 0, mul, same).check(&ints(), &config());
        assert!(result.message().unwrap().contains("left_identity"));
    }
}
