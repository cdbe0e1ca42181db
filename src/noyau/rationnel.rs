// src/noyau/rationnel.rs
//
// Fraction exacte sur i32 (utilisée par pow pour les exposants fractionnaires).
//
// Invariants :
// - toujours réduite (sauf INDEFINI : dénominateur 0, jamais "corrigé")
// - dénominateur >= 0 après construction (le signe est porté par le numérateur),
//   sauf b = i32::MIN avec a impair : |b| = 2^31 n'a pas de forme positive en i32,
//   la fraction est alors laissée telle quelle (valeur exacte, déjà irréductible)
// - égalité structurelle sur la forme réduite
//
// Réduction : diviseur d'essai i = 2, 3, ... et on REDÉMARRE à 2 après chaque
// division commune. Pas de pgcd : le coût de ce balayage fait partie du contrat.
//
// Arithmétique : produits croisés en i32 avec débordement circulaire (wrapping).

use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rationnel {
    a: i32,
    b: i32,
}

impl Rationnel {
    /// Sentinelle : dénominateur nul. Se propage sans erreur.
    pub const INDEFINI: Rationnel = Rationnel { a: 1, b: 0 };

    pub const MAX: Rationnel = Rationnel { a: i32::MAX, b: 1 };

    /// MAX.reciproque()
    pub const MIN: Rationnel = Rationnel { a: 1, b: i32::MAX };

    pub fn new(a: i32, b: i32) -> Self {
        let mut r = Rationnel { a, b };
        r.simplifie();
        r
    }

    /// Fraction à partir d'un flottant : d = nombre de chiffres après le point dans
    /// l'écriture décimale de `v`, dénominateur 10^d (saturé), numérateur arrondi.
    ///
    /// Deux flottants égaux mais écrits avec des longueurs différentes donnent des
    /// fractions différentes : limite connue, conservée.
    pub fn from_f64(v: f64) -> Self {
        let texte = format!("{v}");
        let d = texte.split_once('.').map_or(0, |(_, frac)| frac.len());
        let b = 10i32.saturating_pow(u32::try_from(d).unwrap_or(u32::MAX));
        // `as` sature (et NaN -> 0)
        let a = (v * f64::from(b)).round() as i32;
        Self::new(a, b)
    }

    pub fn numer(&self) -> i32 {
        self.a
    }

    pub fn denom(&self) -> i32 {
        self.b
    }

    pub fn is_undefined(&self) -> bool {
        self.b == 0
    }

    /// Valeur décimale ; None si indéfini.
    pub fn decimal(&self) -> Option<f64> {
        if self.is_undefined() {
            return None;
        }
        Some(f64::from(self.a) / f64::from(self.b))
    }

    pub fn reciproque(&self) -> Self {
        Self::new(self.b, self.a)
    }

    fn simplifie(&mut self) {
        if self.b == 0 {
            return;
        }
        if self.a == 0 {
            self.b = 1;
            return;
        }

        let negatif = (self.a < 0) != (self.b < 0);
        let mut a = self.a.unsigned_abs();
        let mut b = self.b.unsigned_abs();

        let mut i: u32 = 2;
        while i <= a && i <= b && a != 1 && b != 1 {
            if a % i == 0 && b % i == 0 {
                a /= i;
                b /= i;
                i = 2;
            } else {
                i += 1;
            }
        }

        let Ok(b) = i32::try_from(b) else {
            return;
        };
        // |a| = 2^31 n'existe qu'en négatif : wrapping_neg le laisse à i32::MIN
        let a = a as i32;
        self.a = if negatif { a.wrapping_neg() } else { a };
        self.b = b;
    }
}

/* ------------------------ Opérateurs ------------------------ */

impl Add for Rationnel {
    type Output = Rationnel;

    fn add(self, o: Rationnel) -> Rationnel {
        Rationnel::new(
            self.a.wrapping_mul(o.b).wrapping_add(self.b.wrapping_mul(o.a)),
            self.b.wrapping_mul(o.b),
        )
    }
}

impl Sub for Rationnel {
    type Output = Rationnel;

    fn sub(self, o: Rationnel) -> Rationnel {
        Rationnel::new(
            self.a.wrapping_mul(o.b).wrapping_sub(o.a.wrapping_mul(self.b)),
            self.b.wrapping_mul(o.b),
        )
    }
}

impl Mul for Rationnel {
    type Output = Rationnel;

    fn mul(self, o: Rationnel) -> Rationnel {
        Rationnel::new(self.a.wrapping_mul(o.a), self.b.wrapping_mul(o.b))
    }
}

impl Div for Rationnel {
    type Output = Rationnel;

    /// Diviser par un indéfini donne indéfini (pas d'erreur).
    fn div(self, o: Rationnel) -> Rationnel {
        if o.is_undefined() {
            return Rationnel::INDEFINI;
        }
        self * o.reciproque()
    }
}

impl Neg for Rationnel {
    type Output = Rationnel;

    fn neg(self) -> Rationnel {
        Rationnel::new(self.a.wrapping_neg(), self.b)
    }
}

impl PartialOrd for Rationnel {
    /// Signe du numérateur de (self - o).
    fn partial_cmp(&self, o: &Rationnel) -> Option<Ordering> {
        Some((*self - *o).a.cmp(&0))
    }
}

impl Zero for Rationnel {
    fn zero() -> Self {
        Rationnel { a: 0, b: 1 }
    }

    fn is_zero(&self) -> bool {
        self.a == 0 && self.b != 0
    }
}

impl One for Rationnel {
    fn one() -> Self {
        Rationnel { a: 1, b: 1 }
    }
}

impl From<i32> for Rationnel {
    fn from(n: i32) -> Self {
        Rationnel { a: n, b: 1 }
    }
}

impl fmt::Display for Rationnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} / {})", self.a, self.b)
    }
}
