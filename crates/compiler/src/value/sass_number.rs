use std::cmp::Ordering;

use codemap::Span;

use crate::{
    error::{ErrorKind, SassResult},
    unit::{conversion_factor, Unit},
};

use super::{fuzzy_as_int, Number};

/// A number together with the units of its numerator and denominator
///
/// Both unit sequences are kept sorted by spelling, so two numbers with the
/// same units always hold identical sequences.
#[derive(Debug, Clone)]
pub struct SassNumber {
    pub(crate) num: Number,
    pub(crate) numer: Vec<Unit>,
    pub(crate) denom: Vec<Unit>,
}

impl SassNumber {
    pub fn new_unitless<N: Into<Number>>(n: N) -> Self {
        Self {
            num: n.into(),
            numer: Vec::new(),
            denom: Vec::new(),
        }
    }

    pub fn new_with_unit<N: Into<Number>>(n: N, unit: Unit) -> Self {
        Self {
            num: n.into(),
            numer: vec![unit],
            denom: Vec::new(),
        }
    }

    pub fn new<N: Into<Number>>(n: N, mut numer: Vec<Unit>, mut denom: Vec<Unit>) -> Self {
        Unit::sort(&mut numer);
        Unit::sort(&mut denom);

        Self {
            num: n.into(),
            numer,
            denom,
        }
    }

    pub fn num(&self) -> f64 {
        self.num.0
    }

    pub fn is_unitless(&self) -> bool {
        self.numer.is_empty() && self.denom.is_empty()
    }

    /// Whether this number can be written in CSS: no denominator and at most
    /// one numerator unit
    pub fn has_simple_unit(&self) -> bool {
        self.numer.len() <= 1 && self.denom.is_empty()
    }

    /// The single unit of a simple number, if it has one
    pub(crate) fn unit(&self) -> Option<Unit> {
        if self.has_simple_unit() {
            self.numer.first().copied()
        } else {
            None
        }
    }

    pub(crate) fn with_num<N: Into<Number>>(&self, n: N) -> Self {
        Self {
            num: n.into(),
            numer: self.numer.clone(),
            denom: self.denom.clone(),
        }
    }

    /// The units written the way `unit()` reports them, e.g. `em*px/cm*rem`
    pub fn unit_string(&self) -> String {
        let join = |units: &[Unit]| {
            units
                .iter()
                .map(Unit::as_str)
                .collect::<Vec<_>>()
                .join("*")
        };

        let mut unit = join(&self.numer);

        if !self.denom.is_empty() {
            unit.push('/');
            unit.push_str(&join(&self.denom));
        }

        unit
    }

    /// The magnitude expressed in base units, together with those base units
    fn to_base_units(&self) -> (f64, Vec<Unit>, Vec<Unit>) {
        let mut num = self.num.0;

        let mut numer = Vec::with_capacity(self.numer.len());
        for unit in &self.numer {
            let (base, factor) = unit.to_base();
            num *= factor;
            numer.push(base);
        }

        let mut denom = Vec::with_capacity(self.denom.len());
        for unit in &self.denom {
            let (base, factor) = unit.to_base();
            num /= factor;
            denom.push(base);
        }

        Unit::sort(&mut numer);
        Unit::sort(&mut denom);

        (num, numer, denom)
    }

    /// Both operands in shared base units, or `None` when their units cannot
    /// be reconciled
    fn reconcile(&self, other: &Self) -> Option<(f64, f64)> {
        let (left, left_numer, left_denom) = self.to_base_units();
        let (right, right_numer, right_denom) = other.to_base_units();

        if left_numer == right_numer && left_denom == right_denom {
            Some((left, right))
        } else {
            None
        }
    }

    /// Whether both numbers reduce to the same base units
    pub(crate) fn is_comparable_to(&self, other: &Self) -> bool {
        self.reconcile(other).is_some()
    }

    fn incompatible_units(&self, other: &Self, span: Span) -> Box<crate::error::SassError> {
        (
            ErrorKind::Type,
            format!(
                "Incompatible units {} and {}.",
                self.unit_string(),
                other.unit_string()
            ),
            span,
        )
            .into()
    }

    fn add_sub(&self, other: &Self, op: fn(f64, f64) -> f64, span: Span) -> SassResult<Self> {
        if self.is_unitless() || other.is_unitless() {
            let (numer, denom) = if self.is_unitless() {
                (other.numer.clone(), other.denom.clone())
            } else {
                (self.numer.clone(), self.denom.clone())
            };

            return Ok(Self {
                num: Number(op(self.num.0, other.num.0)),
                numer,
                denom,
            });
        }

        let (left, right) = self
            .reconcile(other)
            .ok_or_else(|| self.incompatible_units(other, span))?;

        let mut num = op(left, right);

        // back into the left operand's units
        if left != 0.0 {
            num = num * self.num.0 / left;
        } else if let Some(factor) = self.single_unit_factor() {
            num /= factor;
        }

        Ok(self.with_num(num))
    }

    /// Conversion factor of a number whose units are a single convertible unit
    fn single_unit_factor(&self) -> Option<f64> {
        match (self.numer.as_slice(), self.denom.as_slice()) {
            ([unit], []) => conversion_factor(*unit, unit.to_base().0),
            _ => None,
        }
    }

    pub(crate) fn plus(&self, other: &Self, span: Span) -> SassResult<Self> {
        self.add_sub(other, |a, b| a + b, span)
    }

    pub(crate) fn minus(&self, other: &Self, span: Span) -> SassResult<Self> {
        self.add_sub(other, |a, b| a - b, span)
    }

    pub(crate) fn times(&self, other: &Self) -> Self {
        let mut numer = self.numer.clone();
        numer.extend_from_slice(&other.numer);
        let mut denom = self.denom.clone();
        denom.extend_from_slice(&other.denom);

        Self::cancelled(self.num.0 * other.num.0, numer, denom)
    }

    pub(crate) fn divided_by(&self, other: &Self, span: Span) -> SassResult<Self> {
        if other.num.is_zero() {
            return Err((ErrorKind::Domain, "Division by zero.", span).into());
        }

        let mut numer = self.numer.clone();
        numer.extend_from_slice(&other.denom);
        let mut denom = self.denom.clone();
        denom.extend_from_slice(&other.numer);

        Ok(Self::cancelled(self.num.0 / other.num.0, numer, denom))
    }

    /// Remove units that appear in both the numerator and denominator
    fn cancelled(num: f64, numer: Vec<Unit>, mut denom: Vec<Unit>) -> Self {
        let mut remaining = Vec::with_capacity(numer.len());

        for unit in numer {
            match denom.iter().position(|d| *d == unit) {
                Some(idx) => {
                    denom.remove(idx);
                }
                None => remaining.push(unit),
            }
        }

        Self::new(num, remaining, denom)
    }

    /// Numbers with irreconcilable units are never equal
    pub(crate) fn equals(&self, other: &Self) -> bool {
        if self.is_unitless() != other.is_unitless() {
            return false;
        }

        match self.reconcile(other) {
            Some((left, right)) => Number(left) == Number(right),
            None => false,
        }
    }

    pub(crate) fn compare(&self, other: &Self, span: Span) -> SassResult<Ordering> {
        let (left, right) = if self.is_unitless() || other.is_unitless() {
            (self.num.0, other.num.0)
        } else {
            self.reconcile(other)
                .ok_or_else(|| self.incompatible_units(other, span))?
        };

        if Number(left) == Number(right) {
            return Ok(Ordering::Equal);
        }

        left.partial_cmp(&right).ok_or_else(|| {
            (
                ErrorKind::Domain,
                "NaN can't be compared.".to_owned(),
                span,
            )
                .into()
        })
    }

    /// This number's magnitude in `unit`, if it is unitless or convertible
    pub(crate) fn magnitude_in(&self, unit: Unit) -> Option<f64> {
        if self.is_unitless() {
            return Some(self.num.0);
        }

        match (self.numer.as_slice(), self.denom.as_slice()) {
            ([own], []) => conversion_factor(*own, unit).map(|factor| self.num.0 * factor),
            _ => None,
        }
    }

    pub fn assert_no_units(&self, name: &str, span: Span) -> SassResult<()> {
        if self.is_unitless() {
            Ok(())
        } else {
            Err((
                format!(
                    "${name}: Expected {}{} to have no units.",
                    self.num.to_string(false),
                    self.unit_string(),
                ),
                span,
            )
                .into())
        }
    }

    pub fn assert_int_with_name(&self, name: &'static str, span: Span) -> SassResult<i64> {
        match fuzzy_as_int(self.num.0) {
            Some(i) => Ok(i),
            None => Err((
                format!(
                    "${name}: {}{} is not an int.",
                    self.num.to_string(false),
                    self.unit_string(),
                ),
                span,
            )
                .into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use codemap::CodeMap;

    fn span() -> Span {
        let mut map = CodeMap::new();
        map.add_file("test".to_owned(), "1".to_owned()).span
    }

    #[test]
    fn unitless_inherits_units() {
        let px = SassNumber::new_with_unit(2.0, Unit::Px);
        let sum = px.plus(&SassNumber::new_unitless(3.0), span()).unwrap();
        assert_eq!(sum.num(), 5.0);
        assert_eq!(sum.unit_string(), "px");
    }

    #[test]
    fn addition_converts_into_left_units() {
        let inch = SassNumber::new_with_unit(1.0, Unit::In);
        let px = SassNumber::new_with_unit(96.0, Unit::Px);
        let sum = inch.plus(&px, span()).unwrap();
        assert!((sum.num() - 2.0).abs() < 1e-9);
        assert_eq!(sum.unit_string(), "in");
    }

    #[test]
    fn incompatible_units_do_not_add() {
        let px = SassNumber::new_with_unit(2.0, Unit::Px);
        let em = SassNumber::new_with_unit(3.0, Unit::Em);
        assert_eq!(px.plus(&em, span()).unwrap_err().kind(), ErrorKind::Type);
        assert!(!px.equals(&em));
    }

    #[test]
    fn multiplication_sorts_and_cancels() {
        let a = SassNumber::new(1.0, vec![Unit::Px, Unit::Em], vec![Unit::Rem]);
        let b = SassNumber::new(2.0, vec![Unit::Rem], vec![Unit::Cm]);
        let product = a.times(&b);
        assert_eq!(product.unit_string(), "em*px/cm");
        assert!(!product.has_simple_unit());
    }

    #[test]
    fn division_cancels_identical_units() {
        let a = SassNumber::new_with_unit(10.0, Unit::Px);
        let b = SassNumber::new_with_unit(4.0, Unit::Px);
        let quotient = a.divided_by(&b, span()).unwrap();
        assert!(quotient.is_unitless());
        assert_eq!(quotient.num(), 2.5);
    }
}
