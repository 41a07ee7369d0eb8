//! Conversion ratios between units of the same kind.
//!
//! Every convertible unit is expressed as a multiple of one base unit per
//! kind: `in` for lengths, `deg` for angles, `s` for time, `hz` for frequency
//! and `dpi` for resolution.

use std::{collections::HashMap, f64::consts::PI};

use once_cell::sync::Lazy;

use super::Unit;

static BASE_UNITS: Lazy<HashMap<Unit, (Unit, f64)>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert(Unit::In, (Unit::In, 1.0));
    m.insert(Unit::Cm, (Unit::In, 1.0 / 2.54));
    m.insert(Unit::Mm, (Unit::In, 1.0 / 25.4));
    m.insert(Unit::Q, (Unit::In, 1.0 / 101.6));
    m.insert(Unit::Pc, (Unit::In, 1.0 / 6.0));
    m.insert(Unit::Pt, (Unit::In, 1.0 / 72.0));
    m.insert(Unit::Px, (Unit::In, 1.0 / 96.0));

    m.insert(Unit::Deg, (Unit::Deg, 1.0));
    m.insert(Unit::Grad, (Unit::Deg, 360.0 / 400.0));
    m.insert(Unit::Rad, (Unit::Deg, 180.0 / PI));
    m.insert(Unit::Turn, (Unit::Deg, 360.0));

    m.insert(Unit::S, (Unit::S, 1.0));
    m.insert(Unit::Ms, (Unit::S, 1.0 / 1000.0));

    m.insert(Unit::Hz, (Unit::Hz, 1.0));
    m.insert(Unit::Khz, (Unit::Hz, 1000.0));

    m.insert(Unit::Dpi, (Unit::Dpi, 1.0));
    m.insert(Unit::Dpcm, (Unit::Dpi, 2.54));
    m.insert(Unit::Dppx, (Unit::Dpi, 96.0));

    m
});

impl Unit {
    /// The base unit of this unit's kind and how many base units one of this
    /// unit is worth
    ///
    /// Units without a conversion are their own base.
    pub(crate) fn to_base(self) -> (Unit, f64) {
        BASE_UNITS.get(&self).copied().unwrap_or((self, 1.0))
    }
}

/// The factor that converts a quantity in `from` into a quantity in `to`
pub(crate) fn conversion_factor(from: Unit, to: Unit) -> Option<f64> {
    if from == to {
        return Some(1.0);
    }

    let (from_base, from_factor) = from.to_base();
    let (to_base, to_factor) = to.to_base();

    if from_base == to_base && BASE_UNITS.contains_key(&from) {
        Some(from_factor / to_factor)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lengths_convert_through_inches() {
        let factor = conversion_factor(Unit::In, Unit::Px).unwrap();
        assert!((factor - 96.0).abs() < 1e-9);
        let factor = conversion_factor(Unit::Pt, Unit::In).unwrap();
        assert!((factor - 1.0 / 72.0).abs() < 1e-12);
    }

    #[test]
    fn kinds_do_not_mix() {
        assert_eq!(conversion_factor(Unit::Px, Unit::Deg), None);
        assert_eq!(conversion_factor(Unit::Em, Unit::Px), None);
        assert_eq!(conversion_factor(Unit::Em, Unit::Em), Some(1.0));
    }
}
