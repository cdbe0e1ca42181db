//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> multiplication implicite -> RPN -> Expr -> parcours (f64)
//!
//! Le registre est passé explicitement : aucune liaison temporaire ne survit à l'appel
//! qui l'a posée (appel de fonction utilisateur, dérivée, intégrale).

use tracing::{debug, trace};

use super::erreurs::{malformee, Resultat};
use super::expr::Expr;
use super::jetons::{format_tokens, multiplication_implicite, tokenize};
use super::registre::{Fonction, Registre};
use super::rpn::{from_rpn, to_rpn};

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub implicite: String,
    pub rpn: String,
    pub arbre: String,
}

/// Lit le texte jusqu'à l'arbre. Les étapes ne sont mises en texte que si une
/// démarche est demandée.
fn lire(
    expr_str: &str,
    registre: &Registre,
    mut demarche: Option<&mut Demarche>,
) -> Resultat<Expr> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(malformee("entrée vide"));
    }

    // 1) Jetons (noms connus du plus long au plus court)
    let jetons = tokenize(s, &registre.noms_connus())?;
    if let Some(d) = demarche.as_deref_mut() {
        d.jetons = format_tokens(&jetons);
    }

    // 2) Multiplication implicite
    let jetons = multiplication_implicite(jetons, |n| registre.est_fonction(n));
    if let Some(d) = demarche.as_deref_mut() {
        d.implicite = format_tokens(&jetons);
    }

    // 3) RPN
    let rpn = to_rpn(&jetons, registre)?;
    if let Some(d) = demarche.as_deref_mut() {
        d.rpn = format_tokens(&rpn);
    }

    // 4) AST
    from_rpn(&rpn, registre)
}

/// API publique : évalue une expression et retourne la valeur + la démarche
/// (jetons, jetons après multiplication implicite, rpn, arbre).
pub fn eval_detaille(expr_str: &str, registre: &mut Registre) -> Resultat<(f64, Demarche)> {
    let mut d = Demarche::default();
    let arbre = lire(expr_str, registre, Some(&mut d))?;
    d.arbre = arbre.to_string();
    debug!(jetons = %d.implicite, rpn = %d.rpn, "expression lue");

    let valeur = arbre.evaluer(registre)?;
    debug!(expression = expr_str.trim(), valeur, "évaluée");

    Ok((valeur, d))
}

/// Évalue une expression dans le registre donné (sans démarche).
pub fn evaluate(expr_str: &str, registre: &mut Registre) -> Resultat<f64> {
    let valeur = lire(expr_str, registre, None)?.evaluer(registre)?;
    trace!(expression = expr_str.trim(), valeur, "évaluée");
    Ok(valeur)
}

/// Insère ou écrase une variable.
pub fn define_variable(registre: &mut Registre, nom: &str, valeur: f64) {
    registre.definir_variable(nom, valeur);
}

/// Enregistre `nom(param) = corps`. Le corps n'est lu qu'à l'appel :
/// il peut mentionner des noms définis plus tard.
pub fn define_function(
    registre: &mut Registre,
    nom: &str,
    corps: &str,
    param: &str,
) -> Resultat<()> {
    registre.ajouter_fonction(
        nom,
        Fonction::Utilisateur {
            corps: corps.to_string(),
            param: param.to_string(),
        },
    )?;
    debug!(nom, param, corps, "fonction définie");
    Ok(())
}
