// src/lib.rs
//
// Calculatrice Taylor : interpréteur d'expressions sur une bibliothèque numérique maison
// ----------------------------------------------------------------------------------
// - Aucune fonction trig/exp/ln/racine de la plateforme : tout est approché (séries)
// - Ordre de réduction FIXE : ^ > / > * > + > - (gauche à droite)
// - Contexte explicite : un `Registre` par session, passé à chaque appel
//
// Exemple:
//   let mut r = Registre::new();
//   define_variable(&mut r, "x", 3.0);
//   evaluate("2x", &mut r)             // 6
//   derivative("x^2", "x", 2.0, &mut r) // ≈ 4
//
// La boucle interactive (lecture de lignes, mots-clés, aide) reste côté appelant.

pub mod noyau;

pub use noyau::{
    define_function, define_variable, derivative, derivative_avec, eval_detaille, evaluate,
    integral, integral_avec, Demarche, ErreurCalcul, Rationnel, Registre, Reglages, Resultat,
};
