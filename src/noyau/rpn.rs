// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Priorités STRICTES, toutes associatives à gauche :
//      ^ (5)  >  / (4)  >  * (3)  >  + (2)  >  - (1)
//   Donc "a*b/c" = a*(b/c) et "a-b+c" = a-(b+c) : voulu, pas une coquille.
// - Ident(name):
//    - si name est une fonction du registre => fonction unaire, collée au PROCHAIN atome
//      (nombre, variable, groupe parenthésé ou appel) : "sin 2^2" = (sin 2)^2
//    - sinon => variable (Expr::Var)
// - Pas de moins unaire : un opérateur sans opérande gauche est une erreur.
// - Deux fonctions nues à la suite ("g f 0") : valide seulement si f a été enregistrée
//   AVANT g (les fonctions sont appliquées dans l'ordre d'enregistrement).

use super::erreurs::{malformee, Resultat};
use super::expr::{Expr, Op};
use super::jetons::Tok;
use super::registre::Registre;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Minus => 1,
        Tok::Plus => 2,
        Tok::Star => 3,
        Tok::Slash => 4,
        Tok::Caret => 5,
        _ => 0,
    }
}

fn est_operateur(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret
    )
}

/// Fonction en attente d'argument au sommet de la pile ?
fn sommet_fonction<'a>(ops: &'a [Tok], registre: &Registre) -> Option<&'a str> {
    match ops.last() {
        Some(Tok::Ident(name)) if registre.est_fonction(name) => Some(name.as_str()),
        _ => None,
    }
}

/// Une valeur vient d'être produite : les fonctions en attente la prennent comme argument.
fn sortir_fonctions(ops: &mut Vec<Tok>, out: &mut Vec<Tok>, registre: &Registre) {
    while sommet_fonction(ops, registre).is_some() {
        if let Some(f) = ops.pop() {
            out.push(f);
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Nombre(1), Slash, Nombre(2), RPar]
///   rpn:    [Nombre(1), Nombre(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok], registre: &Registre) -> Resultat<Vec<Tok>> {
    if tokens.is_empty() {
        return Err(malformee("expression vide"));
    }

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Nombre(_) => {
                if prev_was_value {
                    return Err(malformee("deux valeurs sans opérateur"));
                }
                out.push(tok);
                prev_was_value = true;
                sortir_fonctions(&mut ops, &mut out, registre);
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(malformee(format!("opérateur manquant avant '{name}'")));
                }

                if registre.est_fonction(&name) {
                    // fonction nue sous une autre fonction : ordre d'enregistrement
                    if let Some(externe) = sommet_fonction(&ops, registre) {
                        if registre.rang_fonction(&name) >= registre.rang_fonction(externe) {
                            return Err(malformee(format!(
                                "'{externe}' attend un nombre, trouvé '{name}'"
                            )));
                        }
                    }
                    ops.push(Tok::Ident(name));
                } else {
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                    sortir_fonctions(&mut ops, &mut out, registre);
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(malformee("opérateur manquant avant '('"));
                }
                ops.push(tok);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(malformee("parenthèse vide ou opérande manquant"));
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(malformee("parenthèse fermante sans ouvrante"));
                }

                // le groupe fermé est l'argument des fonctions en attente
                sortir_fonctions(&mut ops, &mut out, registre);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(malformee("opérateur sans opérande gauche"));
                }

                // dépile tant que la priorité du sommet est >= (associativité à gauche)
                while let Some(top) = ops.last() {
                    if !est_operateur(top) || precedence(top) < precedence(&tok) {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }
        }
    }

    if !prev_was_value {
        return Err(malformee("opérande manquant en fin d'expression"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(malformee("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok], registre: &Registre) -> Resultat<Expr> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Nombre(n) => st.push(Expr::Nombre(n)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or_else(|| malformee("opérande manquant"))?;
                let a = st.pop().ok_or_else(|| malformee("opérande manquant"))?;

                let op = match tok {
                    Tok::Caret => Op::Puissance,
                    Tok::Slash => Op::Div,
                    Tok::Star => Op::Mul,
                    Tok::Plus => Op::Add,
                    _ => Op::Sub,
                };
                st.push(Expr::Binaire(op, Box::new(a), Box::new(b)));
            }

            Tok::Ident(name) => {
                if registre.est_fonction(&name) {
                    let x = st
                        .pop()
                        .ok_or_else(|| malformee(format!("'{name}' sans argument")))?;
                    st.push(Expr::Appel(name, Box::new(x)));
                } else {
                    st.push(Expr::Var(name));
                }
            }

            Tok::LPar | Tok::RPar => return Err(malformee("parenthèse inattendue en RPN")),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(malformee("la réduction ne converge pas vers une seule valeur")),
    }
}
