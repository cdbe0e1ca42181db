// src/noyau/calcul.rs
//
// Dérivée (différence finie avant) et intégrale (Simpson composite).
// Les deux évaluent l'expression texte plusieurs fois, avec `var` lié temporairement
// dans le registre ; la liaison précédente est restaurée même en cas d'erreur.

use tracing::{debug, trace};

use super::erreurs::{domaine, Resultat};
use super::eval::evaluate;
use super::registre::Registre;

/// f(var = x), liaison restaurée ensuite.
fn echantillon(expr: &str, var: &str, x: f64, registre: &mut Registre) -> Resultat<f64> {
    let y = registre.avec_liaison(var, x, |r| evaluate(expr, r))?;
    trace!(var, x, y, "échantillon");
    Ok(y)
}

/// (f(at + delta) - f(at)) / delta, avec `delta` des réglages du registre.
pub fn derivative(expr: &str, var: &str, at: f64, registre: &mut Registre) -> Resultat<f64> {
    let delta = registre.reglages.delta;
    derivative_avec(expr, var, at, delta, registre)
}

pub fn derivative_avec(
    expr: &str,
    var: &str,
    at: f64,
    delta: f64,
    registre: &mut Registre,
) -> Resultat<f64> {
    if delta == 0.0 || !delta.is_finite() {
        return Err(domaine(format!("pas de dérivation invalide : {delta}")));
    }

    let f0 = echantillon(expr, var, at, registre)?;
    let f1 = echantillon(expr, var, at + delta, registre)?;
    let d = (f1 - f0) / delta;
    debug!(expr, var, at, delta, d, "dérivée");
    Ok(d)
}

/// ∫[a, b] par Simpson composite, `n` = réglages du registre.
pub fn integral(expr: &str, var: &str, a: f64, b: f64, registre: &mut Registre) -> Resultat<f64> {
    let n = registre.reglages.intervalles;
    integral_avec(expr, var, a, b, n, registre)
}

/// Simpson composite à `n` sous-intervalles (n pair, n >= 2) :
/// h/3 · [f(a) + f(b) + 4·Σ f(impairs) + 2·Σ f(pairs intérieurs)]
pub fn integral_avec(
    expr: &str,
    var: &str,
    a: f64,
    b: f64,
    n: usize,
    registre: &mut Registre,
) -> Resultat<f64> {
    if n < 2 {
        return Err(domaine(format!("{n} intervalle(s) : il en faut au moins 2")));
    }
    if n % 2 == 1 {
        return Err(domaine(format!("{n} intervalles : nombre impair")));
    }

    let h = (b - a) / n as f64;
    let mut somme = echantillon(expr, var, a, registre)? + echantillon(expr, var, b, registre)?;

    for i in (1..n).step_by(2) {
        somme += 4.0 * echantillon(expr, var, a + i as f64 * h, registre)?;
    }
    for i in (2..n).step_by(2) {
        somme += 2.0 * echantillon(expr, var, a + i as f64 * h, registre)?;
    }

    let resultat = somme * h / 3.0;
    debug!(expr, var, a, b, n, resultat, "intégrale");
    Ok(resultat)
}
