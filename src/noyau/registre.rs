// src/noyau/registre.rs
//
// Registre = contexte d'évaluation explicite (pas d'état global).
// - variables : nom -> f64 (pré-rempli avec e et pi)
// - fonctions : nom -> fonction unaire, dans l'ORDRE d'enregistrement
//               (sin, cos, tan, sec, csc, cosec, cot, abs, ln, exp, puis l'utilisateur)
//
// Discipline des liaisons temporaires (dérivée, intégrale, appel de fonction utilisateur) :
// sauvegarder -> lier -> évaluer -> restaurer, y compris quand l'évaluation échoue.

use std::collections::HashMap;
use std::f64::consts::PI;

use tracing::warn;

use super::erreurs::{ErreurCalcul, Resultat};
use super::puissances::{self, E};
use super::reglages::Reglages;
use super::trig;

/// Fonction prédéfinie : reçoit les réglages (longueur des séries de ln/exp).
pub type FonctionNative = fn(f64, &Reglages) -> Resultat<f64>;

#[derive(Clone, Debug)]
pub enum Fonction {
    Native(FonctionNative),

    /// `corps` évalué avec `param` lié temporairement à l'argument.
    Utilisateur { corps: String, param: String },
}

#[derive(Clone, Debug)]
pub struct Registre {
    variables: HashMap<String, f64>,
    fonctions: Vec<(String, Fonction)>,
    pub reglages: Reglages,
    profondeur: usize,
}

impl Default for Registre {
    fn default() -> Self {
        Self::with_reglages(Reglages::default())
    }
}

impl Registre {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reglages(reglages: Reglages) -> Self {
        let mut variables = HashMap::new();
        variables.insert("e".to_string(), E);
        variables.insert("pi".to_string(), PI);

        let natives: [(&str, FonctionNative); 10] = [
            ("sin", |x, _| trig::sin(x)),
            ("cos", |x, _| trig::cos(x)),
            ("tan", |x, _| trig::tan(x)),
            ("sec", |x, _| trig::sec(x)),
            ("csc", |x, _| trig::csc(x)),
            ("cosec", |x, _| trig::cosec(x)),
            ("cot", |x, _| trig::cot(x)),
            ("abs", |x, _| Ok(puissances::abs(x))),
            ("ln", |x, r| puissances::ln(x, r.iterations_ln)),
            ("exp", |x, r| puissances::exp(x, r.iterations_exp)),
        ];
        let fonctions = natives
            .into_iter()
            .map(|(nom, f)| (nom.to_string(), Fonction::Native(f)))
            .collect();

        Self {
            variables,
            fonctions,
            reglages,
            profondeur: 0,
        }
    }

    /* ------------------------ Variables ------------------------ */

    pub fn variable(&self, nom: &str) -> Option<f64> {
        self.variables.get(nom).copied()
    }

    pub fn est_variable(&self, nom: &str) -> bool {
        self.variables.contains_key(nom)
    }

    /// Insère ou écrase.
    pub fn definir_variable(&mut self, nom: &str, valeur: f64) {
        if let Some(ancienne) = self.variables.insert(nom.to_string(), valeur) {
            warn!(nom, ancienne, valeur, "variable redéfinie");
        }
    }

    pub fn supprimer_variable(&mut self, nom: &str) -> Option<f64> {
        self.variables.remove(nom)
    }

    /// Noms des variables, triés (ordre stable pour l'affichage).
    pub fn noms_variables(&self) -> Vec<String> {
        let mut noms: Vec<String> = self.variables.keys().cloned().collect();
        noms.sort();
        noms
    }

    /* ------------------------ Fonctions ------------------------ */

    pub fn fonction(&self, nom: &str) -> Option<&Fonction> {
        self.fonctions
            .iter()
            .find(|(n, _)| n == nom)
            .map(|(_, f)| f)
    }

    pub fn est_fonction(&self, nom: &str) -> bool {
        self.fonction(nom).is_some()
    }

    /// Rang d'enregistrement (0 = sin).
    pub fn rang_fonction(&self, nom: &str) -> Option<usize> {
        self.fonctions.iter().position(|(n, _)| n == nom)
    }

    /// Enregistre une fonction ; refuse un nom de fonction déjà pris.
    pub fn ajouter_fonction(&mut self, nom: &str, fonction: Fonction) -> Resultat<()> {
        if self.est_fonction(nom) {
            warn!(nom, "fonction déjà définie");
            return Err(ErreurCalcul::CollisionNom(nom.to_string()));
        }
        self.fonctions.push((nom.to_string(), fonction));
        Ok(())
    }

    /// Noms des fonctions, dans l'ordre d'enregistrement.
    pub fn noms_fonctions(&self) -> Vec<String> {
        self.fonctions.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Variables ∪ fonctions, du plus long au plus court (tri stable).
    /// Sert au découpage en jetons : "cosec" doit passer avant "cos".
    pub fn noms_connus(&self) -> Vec<String> {
        let mut noms = self.noms_variables();
        noms.extend(self.noms_fonctions());
        noms.sort_by(|a, b| b.len().cmp(&a.len()));
        noms
    }

    /* ------------------------ Liaisons temporaires ------------------------ */

    /// Lie `nom` à `valeur` le temps de `f`, puis restaure l'ancienne liaison
    /// (ou retire la variable si elle n'existait pas), même si `f` échoue.
    pub fn avec_liaison<T>(
        &mut self,
        nom: &str,
        valeur: f64,
        f: impl FnOnce(&mut Registre) -> Resultat<T>,
    ) -> Resultat<T> {
        let avant = self.variables.insert(nom.to_string(), valeur);
        let res = f(self);
        match avant {
            Some(v) => {
                self.variables.insert(nom.to_string(), v);
            }
            None => {
                self.variables.remove(nom);
            }
        }
        res
    }

    /// Compte un niveau d'appel de fonction utilisateur le temps de `f`.
    /// Garde-fou : au-delà de `reglages.profondeur_max()`, erreur.
    pub(crate) fn avec_appel<T>(
        &mut self,
        f: impl FnOnce(&mut Registre) -> Resultat<T>,
    ) -> Resultat<T> {
        let max = self.reglages.profondeur_max();
        if self.profondeur >= max {
            return Err(ErreurCalcul::ProfondeurExcessive(max));
        }
        self.profondeur += 1;
        let res = f(self);
        self.profondeur -= 1;
        res
    }
}
