//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés attendues du noyau sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Ordre de réduction FIXE ^ > / > * > + > - : "1-2+3" vaut -4, "2*6/3" vaut 4.
//! - Pas de moins unaire : "-1" est refusé ; on écrit "0-1".
//! - Le point décimal coupe un nombre en deux : "1.5" est refusé.
//! - Exposants fractionnaires : la fraction vient de l'écriture décimale de l'exposant.
//!   On se limite à des écritures courtes (0.5, 1.5) pour que la réduction reste rapide.

use std::f64::consts::{FRAC_PI_2, PI};
use std::time::{Duration, Instant};

use num_bigint::BigInt;

use super::erreurs::ErreurCalcul;
use super::jetons::{format_tokens, tokenize, Tok};
use super::puissances::{factorielle, pow};
use super::rationnel::Rationnel;
use super::trig::{cos, sin};
use super::{define_function, define_variable, derivative, evaluate, integral, Registre};

fn eval_ok(expr: &str, r: &mut Registre) -> f64 {
    evaluate(expr, r).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, r: &mut Registre, attendu: f64, tol: f64) {
    let v = eval_ok(expr, r);
    assert!(
        (v - attendu).abs() <= tol,
        "expr={expr:?} attendu={attendu} obtenu={v}"
    );
}

fn assert_malformee(expr: &str, r: &mut Registre) {
    let res = evaluate(expr, r);
    assert!(
        matches!(res, Err(ErreurCalcul::ExpressionMalformee(_))),
        "expr={expr:?} attendu ExpressionMalformee, obtenu {res:?}"
    );
}

fn assert_domaine(expr: &str, r: &mut Registre) {
    let res = evaluate(expr, r);
    assert!(
        matches!(res, Err(ErreurCalcul::Domaine(_))),
        "expr={expr:?} attendu Domaine, obtenu {res:?}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Fractions ------------------------ */

#[test]
fn sci_fractions_reduites() {
    assert_eq!(Rationnel::new(6, -8), Rationnel::new(-3, 4));
    assert_eq!(Rationnel::new(6, -8).numer(), -3);
    assert_eq!(Rationnel::new(6, -8).denom(), 4);
    assert_eq!(Rationnel::new(2, 4), Rationnel::new(1, 2));
    assert_eq!(
        Rationnel::new(1, 2) + Rationnel::new(1, 3),
        Rationnel::new(5, 6)
    );
}

#[test]
fn sci_fraction_indefinie_silencieuse() {
    let indefini = Rationnel::new(1, 0);
    assert!(indefini.is_undefined());
    assert!((indefini / Rationnel::new(2, 1)).is_undefined());
    assert!((Rationnel::new(2, 1) / indefini).is_undefined());
    assert_eq!(indefini.decimal(), None);
}

/* ------------------------ Bibliothèque numérique ------------------------ */

#[test]
fn sci_puissances() {
    assert_eq!(pow(2.0, 10.0).unwrap(), 1024.0);
    assert_eq!(pow(2.0, -1.0).unwrap(), 0.5);
    assert_eq!(factorielle(0).unwrap(), BigInt::from(1));
    assert_eq!(factorielle(5).unwrap(), BigInt::from(120));
    assert!(matches!(factorielle(-1), Err(ErreurCalcul::Domaine(_))));
}

#[test]
fn sci_trig_tolerance_taylor() {
    assert!(sin(0.0).unwrap().abs() <= 1e-3);
    assert!((cos(0.0).unwrap() - 1.0).abs() <= 1e-3);
    assert!((sin(FRAC_PI_2).unwrap() - 1.0).abs() <= 1e-3);
}

#[test]
fn sci_trig_symetries() {
    // sin(-x) = -sin(x), cos(-x) = cos(x)
    for k in 1..12 {
        let x = f64::from(k) * 0.25;
        let s = sin(x).unwrap();
        assert!((sin(-x).unwrap() + s).abs() <= 1e-3, "x={x}");
        assert!((cos(-x).unwrap() - cos(x).unwrap()).abs() <= 1e-3, "x={x}");
        // sin² + cos² ≈ 1
        let c = cos(x).unwrap();
        assert!((s * s + c * c - 1.0).abs() <= 1e-3, "x={x}");
    }
}

#[test]
fn sci_trig_periodicite() {
    for k in 0..8 {
        let x = f64::from(k) * 0.7;
        let a = sin(x).unwrap();
        let b = sin(x + 2.0 * PI).unwrap();
        assert!((a - b).abs() <= 1e-3, "x={x} a={a} b={b}");
    }
}

/* ------------------------ Évaluateur ------------------------ */

#[test]
fn sci_evaluateur_proprietes() {
    let mut r = Registre::new();
    assert_eq!(eval_ok("2+3*4", &mut r), 14.0);
    assert_eq!(eval_ok("(2+3)*4", &mut r), 20.0);
    define_variable(&mut r, "x", 3.0);
    assert_eq!(eval_ok("2x", &mut r), 6.0);
    assert_eq!(eval_ok("sin(0)", &mut r), 0.0);
}

#[test]
fn sci_ordre_de_reduction() {
    let mut r = Registre::new();
    assert_eq!(eval_ok("1-2+3", &mut r), -4.0);
    assert_eq!(eval_ok("2^3^2", &mut r), 64.0);
    assert_eq!(eval_ok("8/2/2", &mut r), 2.0);
    assert_eq!(eval_ok("2*6/3", &mut r), 4.0);
    assert_eq!(eval_ok("12/2*3", &mut r), 18.0);
    assert_eq!(eval_ok("10-4-3", &mut r), 3.0);
    assert_eq!(eval_ok("0-1", &mut r), -1.0);
    assert_eq!(eval_ok("2^0-1", &mut r), 0.0);
}

#[test]
fn sci_fonctions_et_atomes() {
    let mut r = Registre::new();
    // la fonction consomme l'atome suivant
    assert_proche("cos 0*2", &mut r, 2.0, 1e-3);
    assert_proche("abs(3-5)^2", &mut r, 4.0, 0.0);
    // composition nue : cos enregistré après sin
    assert_proche("cos sin 0", &mut r, 1.0, 1e-3);
    assert_malformee("sin cos 0", &mut r);
    // mais entre parenthèses tout passe
    assert_proche("sin(cos(0))", &mut r, 0.841471, 1e-3);
}

#[test]
fn sci_constantes_et_noms_longs() {
    let mut r = Registre::new();
    assert_proche("2pi", &mut r, 2.0 * PI, 0.0);
    assert_proche("exp(2)", &mut r, std::f64::consts::E.powi(2), 1e-9);
    assert_proche("ln(10)", &mut r, 2.30258509299, 0.0);
    // réponse fixe historique : ln(1) vaut e
    assert_proche("ln(1)", &mut r, std::f64::consts::E, 0.0);
    assert_proche("cosec(pi/2)", &mut r, 1.0, 1e-3);
}

#[test]
fn sci_puissance_fractionnaire_via_evaluateur() {
    let mut r = Registre::new();
    define_variable(&mut r, "h", 0.5);
    // 4^0.5 = root(4, 2)
    assert_proche("4^h", &mut r, 2.0, 1e-2);
}

#[test]
fn sci_erreurs() {
    let mut r = Registre::new();
    assert_malformee("", &mut r);
    assert_malformee("-1", &mut r);
    assert_malformee("1.5", &mut r);
    assert_malformee("2 3", &mut r);
    assert_malformee("(1+2", &mut r);
    assert_malformee("1+2)", &mut r);
    assert_malformee("*2", &mut r);
    assert_malformee("sin", &mut r);
    assert_malformee("inconnu", &mut r);

    assert_domaine("tan(pi/2)", &mut r);
    assert_domaine("sec(pi/2)", &mut r);
    assert_domaine("csc(0)", &mut r);
    assert_domaine("cot(0)", &mut r);
    assert_domaine("ln(0)", &mut r);
    assert_domaine("ln(0-2)", &mut r);
}

#[test]
fn sci_division_par_zero_ieee() {
    let mut r = Registre::new();
    assert_eq!(eval_ok("1/0", &mut r), f64::INFINITY);
    assert!(eval_ok("0/0", &mut r).is_nan());
}

#[test]
fn sci_idempotence_du_resultat() {
    let mut r = Registre::new();
    let v = eval_ok("2+3*4", &mut r);
    let t = vec![Tok::Nombre(v)];
    let relu = tokenize(&format_tokens(&t), &r.noms_connus()).unwrap();
    assert_eq!(relu, t);
}

/* ------------------------ Fonctions utilisateur ------------------------ */

#[test]
fn sci_fonction_utilisateur_et_collision() {
    let mut r = Registre::new();
    define_function(&mut r, "sq", "x^2", "x").unwrap();
    assert_eq!(eval_ok("sq(3)", &mut r), 9.0);
    assert!(matches!(
        define_function(&mut r, "sq", "x^3", "x"),
        Err(ErreurCalcul::CollisionNom(_))
    ));
    // la première définition reste en place
    assert_eq!(eval_ok("sq(4)", &mut r), 16.0);
}

#[test]
fn sci_fonctions_qui_s_appellent() {
    let mut r = Registre::new();
    define_function(&mut r, "sq", "x^2", "x").unwrap();
    define_function(&mut r, "quad", "sq(sq(y))", "y").unwrap();
    assert_eq!(eval_ok("quad(2)", &mut r), 16.0);
    assert!(!r.est_variable("x"));
    assert!(!r.est_variable("y"));
}

#[test]
fn sci_recursion_infinie_arretee() {
    let mut r = Registre::new();
    define_function(&mut r, "a", "b(x)", "x").unwrap();
    define_function(&mut r, "b", "a(x)", "x").unwrap();
    assert!(matches!(
        evaluate("a(1)", &mut r),
        Err(ErreurCalcul::ProfondeurExcessive(_))
    ));
    assert!(!r.est_variable("x"));
}

/* ------------------------ Calcul ------------------------ */

#[test]
fn sci_calcul_proprietes() {
    let mut r = Registre::new();
    let d = derivative("x^2", "x", 2.0, &mut r).unwrap();
    assert!((d - 4.0).abs() <= 1e-3, "d={d}");

    let i = integral("x^2", "x", 0.0, 1.0, &mut r).unwrap();
    assert!((i - 1.0 / 3.0).abs() <= 1e-4, "i={i}");
}

#[test]
fn sci_calcul_trig() {
    let mut r = Registre::new();
    // d/dx sin(x) en 0 = 1
    let d = derivative("sin(x)", "x", 0.0, &mut r).unwrap();
    assert!((d - 1.0).abs() <= 1e-3, "d={d}");

    // ∫[0,π] sin = 2 (Simpson n=8 + Taylor tronqué)
    let i = integral("sin(x)", "x", 0.0, PI, &mut r).unwrap();
    assert!((i - 2.0).abs() <= 1e-2, "i={i}");
}

#[test]
fn sci_registre_inchange_apres_calcul() {
    let mut r = Registre::new();
    define_variable(&mut r, "x", 9.0);
    let avant = r.noms_variables();

    let _ = derivative("x^2", "x", 1.0, &mut r).unwrap();
    let _ = integral("x", "x", 0.0, 1.0, &mut r).unwrap();
    let _ = derivative("ln(x)", "x", 0.0, &mut r);
    let _ = integral("ln(x)", "x", 0.0, 1.0, &mut r);

    assert_eq!(r.noms_variables(), avant);
    assert_eq!(r.variable("x"), Some(9.0));
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut r = Registre::new();
    let mut expr = String::new();
    for k in 0..200 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1/2");
        budget(t0, max);
    }

    // / avant + : 200 × 0.5
    assert_eq!(eval_ok(&expr, &mut r), 100.0);
    budget(t0, max);
}

#[test]
fn sci_stress_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut r = Registre::new();
    let mut expr = "1".to_string();
    for _ in 0..100 {
        expr = format!("({expr}+1)");
    }
    assert_eq!(eval_ok(&expr, &mut r), 101.0);
    budget(t0, max);
}

#[test]
fn sci_stress_trig_grands_angles() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // réduction modulo 2π : reste fini et borné
    for k in 1..50 {
        let x = f64::from(k) * 123.0;
        let s = sin(x).unwrap();
        assert!(s.is_finite() && s.abs() <= 1.01, "x={x} s={s}");
        budget(t0, max);
    }
}
