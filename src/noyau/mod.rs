//! Noyau Taylor (sans libm)
//!
//! Organisation interne :
//! - rationnel.rs  : fractions i32 + sentinelle indéfinie
//! - puissances.rs : pow, racine, ln, exp, factorielle
//! - trig.rs       : sin (Taylor) et dérivées trigonométriques
//! - registre.rs   : variables + fonctions (contexte explicite)
//! - jetons.rs     : tokenisation + multiplication implicite
//! - rpn.rs        : shunting-yard (^ / * + -) + construction Expr
//! - expr.rs       : AST + évaluation par parcours
//! - eval.rs       : pipeline complet + API publique
//! - calcul.rs     : dérivée, intégrale
//! - erreurs.rs    : ErreurCalcul
//! - reglages.rs   : pas, intervalles, longueurs de séries, profondeur

pub mod calcul;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod jetons;
pub mod puissances;
pub mod rationnel;
pub mod registre;
pub mod reglages;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use calcul::{derivative, derivative_avec, integral, integral_avec};
pub use erreurs::{ErreurCalcul, Resultat};
pub use eval::{define_function, define_variable, eval_detaille, evaluate, Demarche};
pub use rationnel::Rationnel;
pub use registre::Registre;
pub use reglages::Reglages;
