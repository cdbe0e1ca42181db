// src/noyau/erreurs.rs
//
// Erreurs du noyau.
// - Domaine            : argument hors domaine (ln(x<=0), racine d'indice 0, tan(π/2) exact, ...)
// - CollisionNom       : fonction déjà définie
// - ExpressionMalformee: la réduction ne converge pas vers un seul nombre
// - ProfondeurExcessive: garde-fou sur les fonctions utilisateur récursives
//
// NOTE: la fraction indéfinie (dénominateur 0) n'est PAS une erreur :
// c'est une sentinelle propagée silencieusement par `Rationnel`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("domaine : {0}")]
    Domaine(String),

    #[error("'{0}' est déjà défini")]
    CollisionNom(String),

    #[error("expression invalide : {0}")]
    ExpressionMalformee(String),

    #[error("profondeur d'appel dépassée ({0})")]
    ProfondeurExcessive(usize),
}

pub type Resultat<T> = Result<T, ErreurCalcul>;

/// Raccourci : erreur de domaine.
pub(crate) fn domaine(msg: impl Into<String>) -> ErreurCalcul {
    ErreurCalcul::Domaine(msg.into())
}

/// Raccourci : expression malformée.
pub(crate) fn malformee(msg: impl Into<String>) -> ErreurCalcul {
    ErreurCalcul::ExpressionMalformee(msg.into())
}
