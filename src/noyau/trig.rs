// src/noyau/trig.rs
//
// Trigonométrie approchée (sans libm)
// -----------------------------------
// - sin sur [0, π/2] : polynôme de Taylor à 5 termes (θ - θ³/3! + ... + θ⁹/9!)
// - [-π/2, 0)        : imparité
// - [-π, π]          : sin(a+b) = sin(a)cos(b) + cos(a)sin(b), a = θ - π/2
// - [-2π, 2π]        : sin(θ) = -sin(θ - π)
// - ailleurs         : réduction θ - 2π·trunc(θ/2π)
// - cos(θ) = sin(π/2 - θ), le reste en découle
//
// NOTE: la troncature à 5 termes est fixe ; la précision se dégrade avec le nombre
// de réductions. Les fonctions réciproques refusent un zéro EXACT (pas d'intervalle).

use std::f64::consts::{FRAC_PI_2, PI};

use tracing::debug;

use super::erreurs::{domaine, Resultat};
use super::puissances::{factorielle_f64, pow};

pub fn sin(theta: f64) -> Resultat<f64> {
    if !theta.is_finite() {
        return Err(domaine(format!("sin({theta}) : argument non fini")));
    }

    if (0.0..=FRAC_PI_2).contains(&theta) {
        let mut approx = theta;
        for i in 1u32..5 {
            let d = f64::from(i);
            let k = 2.0 * d + 1.0;
            approx += pow(-1.0, d)? * pow(theta, k)? / factorielle_f64(2 * i as usize + 1)?;
        }
        return Ok(approx);
    }

    if (-FRAC_PI_2..=0.0).contains(&theta) {
        return Ok(-sin(-theta)?);
    }

    if (-PI..=PI).contains(&theta) {
        let a = theta - FRAC_PI_2;
        let b = theta - a;
        return Ok(sin(a)? * cos(b)? + cos(a)? * sin(b)?);
    }

    let tour = 2.0 * PI;
    if (-tour..=tour).contains(&theta) {
        return Ok(-sin(theta - PI)?);
    }

    sin(theta - tour * (theta / tour).trunc())
}

pub fn cos(theta: f64) -> Resultat<f64> {
    sin(FRAC_PI_2 - theta)
}

pub fn tan(theta: f64) -> Resultat<f64> {
    let c = cos(theta)?;
    if c == 0.0 {
        return Err(domaine(format!("tan(x) est indéfini pour x = {theta}")));
    }
    Ok(sin(theta)? / c)
}

pub fn sec(theta: f64) -> Resultat<f64> {
    let c = cos(theta)?;
    if c == 0.0 {
        return Err(domaine(format!("sec(x) est indéfini pour x = {theta}")));
    }
    Ok(1.0 / c)
}

pub fn csc(theta: f64) -> Resultat<f64> {
    let s = sin(theta)?;
    if s == 0.0 {
        return Err(domaine(format!("cosec(x) est indéfini pour x = {theta}")));
    }
    Ok(1.0 / s)
}

pub fn cosec(theta: f64) -> Resultat<f64> {
    csc(theta)
}

pub fn cot(theta: f64) -> Resultat<f64> {
    let t = tan(theta)?;
    if t == 0.0 {
        return Err(domaine(format!("cot(x) est indéfini pour x = {theta}")));
    }
    debug!(x = theta, "cot");
    Ok(1.0 / t)
}
