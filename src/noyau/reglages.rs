//! src/noyau/reglages.rs
//!
//! Réglages du noyau (pas de logique de calcul ici).
//!
//! Rôle : regrouper les paramètres fixes des approximations (longueur des séries,
//! pas de dérivation, nombre d'intervalles de Simpson) et les garde-fous.
//!
//! Contrats :
//! - Les itérations ne sont JAMAIS raffinées automatiquement : ce sont des comptes fixes.
//! - Défense en profondeur : la profondeur d'appel des fonctions utilisateur est bornée.

/// Pas de la différence finie avant.
pub const DELTA_DEFAUT: f64 = 1e-5;

/// Nombre d'intervalles de Simpson (pair, >= 2).
pub const INTERVALLES_DEFAUT: usize = 8;

/// Longueur de la série de ln (et donc de root).
pub const ITERATIONS_LN_DEFAUT: usize = 30;

/// Longueur de la série de exp.
pub const ITERATIONS_EXP_DEFAUT: usize = 15;

/// Profondeur d'appel des fonctions utilisateur par défaut.
const PROFONDEUR_DEFAUT: usize = 64;

/// Garde-fou : on borne la profondeur (anti-débordement de pile).
const PROFONDEUR_MAX: usize = 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct Reglages {
    pub delta: f64,
    pub intervalles: usize,
    pub iterations_ln: usize,
    pub iterations_exp: usize,
    profondeur_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            delta: DELTA_DEFAUT,
            intervalles: INTERVALLES_DEFAUT,
            iterations_ln: ITERATIONS_LN_DEFAUT,
            iterations_exp: ITERATIONS_EXP_DEFAUT,
            profondeur_max: PROFONDEUR_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn profondeur_max(&self) -> usize {
        self.profondeur_max
    }

    /// Garde-fou : limite la profondeur dans [1, PROFONDEUR_MAX].
    pub fn set_profondeur_max(&mut self, profondeur: usize) {
        self.profondeur_max = profondeur.clamp(1, PROFONDEUR_MAX);
    }
}
