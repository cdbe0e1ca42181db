// src/noyau/puissances.rs
//
// Puissances, racines, ln, exp, factorielle, sans libm.
// --------------------------------------------------------
// - pow  : exposant entier => multiplications répétées ; sinon x^(a/b) = root(x^a, b)
//          avec a/b tiré de l'ÉCRITURE décimale de l'exposant (cf. Rationnel::from_f64)
// - root : x^(1/n) = exp(ln(x)/n)
// - ln   : série de Taylor autour de 1 pour x < 2 ; sinon ln(x) = ln(x/10^p) + p·ln(10)
// - exp  : exposant entier => pow(e, x) ; sinon série de Maclaurin
//
// Les nombres d'itérations sont des comptes FIXES (pas de test de convergence).

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};

use super::erreurs::{domaine, Resultat};
use super::rationnel::Rationnel;
use super::reglages::{ITERATIONS_EXP_DEFAUT, ITERATIONS_LN_DEFAUT};

pub const E: f64 = std::f64::consts::E;

/// Réponse fixe pour ln(10).
const LN_10: f64 = 2.30258509299;

/// Réponse fixe pour ln(1) : e, et non 0 (valeur historique conservée).
const LN_1: f64 = E;

pub fn abs(x: f64) -> f64 {
    if x >= 0.0 {
        x
    } else {
        -x
    }
}

/// Vrai si `n` est un entier à epsilon machine près.
pub fn peut_etre_entier(n: f64) -> bool {
    abs(n - n.round()) <= f64::EPSILON
}

fn verifie_iterations(iterations: usize) -> Resultat<()> {
    if iterations < 1 {
        return Err(domaine(format!(
            "{iterations} itération(s) demandée(s), il en faut au moins 1"
        )));
    }
    Ok(())
}

/// n! exact.
pub fn factorielle(n: i64) -> Resultat<BigInt> {
    if n < 0 {
        return Err(domaine(format!("factorielle de {n} (< 0)")));
    }

    let mut valeur = BigInt::one();
    for i in 2..=n {
        valeur *= i;
    }
    Ok(valeur)
}

/// n! en flottant (infini si hors de portée de f64).
pub(crate) fn factorielle_f64(n: usize) -> Resultat<f64> {
    let n = i64::try_from(n).map_err(|_| domaine("factorielle : argument trop grand"))?;
    Ok(factorielle(n)?.to_f64().unwrap_or(f64::INFINITY))
}

pub fn pow(x: f64, p: f64) -> Resultat<f64> {
    if !p.is_finite() {
        return Err(domaine(format!("exposant non fini : {p}")));
    }

    if peut_etre_entier(p) {
        if p < 0.0 {
            return Ok(1.0 / pow(x, abs(p))?);
        }

        let n = p.round() as u64;
        if abs(x) == 1.0 {
            return Ok(if x < 0.0 && n % 2 == 1 { -1.0 } else { 1.0 });
        }

        let mut reponse: f64 = 1.0;
        for fait in 0..n {
            // 0, ±inf et NaN sont absorbants : seul le signe peut encore changer
            if reponse == 0.0 || !reponse.is_finite() {
                if x < 0.0 && (n - fait) % 2 == 1 {
                    reponse = -reponse;
                }
                break;
            }
            reponse *= x;
        }
        return Ok(reponse);
    }

    // x^(a/b) = root(x^a, b)
    let frac = Rationnel::from_f64(p);
    root(
        pow(x, f64::from(frac.numer()))?,
        f64::from(frac.denom()),
        ITERATIONS_LN_DEFAUT,
    )
}

/// Racine n-ième : exp(ln(x)/n).
pub fn root(x: f64, n: f64, iterations: usize) -> Resultat<f64> {
    verifie_iterations(iterations)?;
    if n == 0.0 {
        return Err(domaine("racine d'indice 0"));
    }
    if n == 1.0 || x == 1.0 {
        return Ok(x);
    }

    exp(ln(x, iterations)? / n, ITERATIONS_EXP_DEFAUT)
}

pub fn ln(x: f64, iterations: usize) -> Resultat<f64> {
    verifie_iterations(iterations)?;
    if x.is_nan() || x <= 0.0 {
        return Err(domaine(format!("ln({x}) : argument <= 0")));
    }
    if x.is_infinite() {
        return Err(domaine("ln : argument infini"));
    }
    if x == 1.0 {
        return Ok(LN_1);
    }
    if x == 10.0 {
        return Ok(LN_10);
    }

    if x < 2.0 {
        // ln(1+y) = y - y^2/2 + y^3/3 - ...
        let y = x - 1.0;
        let mut somme = y;
        for k in 2..iterations {
            let k = k as f64;
            somme += pow(-1.0, k + 1.0)? * pow(y, k)? / k;
        }
        return Ok(somme);
    }

    // ln(3456.789) = ln(0.3456789) + 4·ln(10)
    let p = chiffres_avant_virgule(x) as f64;
    let echelle = pow(10.0, p)?;
    let reduit = if echelle.is_finite() {
        x / echelle
    } else {
        // x >= 1e308 : 10^309 déborde, on divise en deux temps
        x / 10.0 / pow(10.0, p - 1.0)?
    };
    Ok(ln(reduit, iterations)? + p * ln(10.0, iterations)?)
}

/// Nombre de chiffres de la partie entière dans l'écriture décimale de `x`.
fn chiffres_avant_virgule(x: f64) -> usize {
    let texte = format!("{x}");
    texte.split('.').next().map_or(0, str::len)
}

pub fn exp(x: f64, iterations: usize) -> Resultat<f64> {
    verifie_iterations(iterations)?;
    if peut_etre_entier(x) {
        return pow(E, x);
    }

    let mut somme = 0.0;
    for k in 0..iterations {
        somme += pow(x, k as f64)? / factorielle_f64(k)?;
    }
    Ok(somme)
}
