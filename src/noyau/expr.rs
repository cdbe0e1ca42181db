// src/noyau/expr.rs
//
// Arbre d'expression + évaluation par parcours.
// - Nombre  : valeur déjà numérique
// - Var     : lue dans le registre au moment de l'évaluation
// - Appel   : fonction unaire (native ou utilisateur)
// - Binaire : ^ / * + -
//
// L'ordre des priorités est fixé par rpn.rs (^ > / > * > + > -) ;
// ici on se contente d'évaluer gauche puis droite.
//
// Parcours, affichage et libération sont itératifs (pile explicite) : une somme
// de 20 000 termes donne un arbre de profondeur 20 000.

use std::fmt::{self, Write as _};

use super::erreurs::{malformee, Resultat};
use super::eval::evaluate;
use super::puissances::pow;
use super::registre::{Fonction, Registre};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Puissance,
    Div,
    Mul,
    Add,
    Sub,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Puissance => '^',
            Op::Div => '/',
            Op::Mul => '*',
            Op::Add => '+',
            Op::Sub => '-',
        }
    }

    /// `/` suit IEEE (x/0 = ±inf ou NaN), seul `^` peut échouer.
    pub fn appliquer(self, a: f64, b: f64) -> Resultat<f64> {
        match self {
            Op::Puissance => pow(a, b),
            Op::Div => Ok(a / b),
            Op::Mul => Ok(a * b),
            Op::Add => Ok(a + b),
            Op::Sub => Ok(a - b),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Var(String),
    Appel(String, Box<Expr>),
    Binaire(Op, Box<Expr>, Box<Expr>),
}

/// Travail en attente du parcours d'évaluation.
enum Tache<'a> {
    Visiter(&'a Expr),
    Appeler(&'a str),
    Operer(Op),
}

impl Expr {
    pub fn evaluer(&self, registre: &mut Registre) -> Resultat<f64> {
        use Expr::*;

        let mut taches = vec![Tache::Visiter(self)];
        let mut valeurs: Vec<f64> = Vec::new();
        let depiler = |valeurs: &mut Vec<f64>| {
            valeurs
                .pop()
                .ok_or_else(|| malformee("pile d'évaluation vide"))
        };

        while let Some(tache) = taches.pop() {
            match tache {
                Tache::Visiter(Nombre(n)) => valeurs.push(*n),

                Tache::Visiter(Var(nom)) => valeurs.push(
                    registre
                        .variable(nom)
                        .ok_or_else(|| malformee(format!("variable inconnue '{nom}'")))?,
                ),

                Tache::Visiter(Appel(nom, arg)) => {
                    taches.push(Tache::Appeler(nom));
                    taches.push(Tache::Visiter(&**arg));
                }

                // gauche d'abord : empilée en dernier
                Tache::Visiter(Binaire(op, a, b)) => {
                    taches.push(Tache::Operer(*op));
                    taches.push(Tache::Visiter(&**b));
                    taches.push(Tache::Visiter(&**a));
                }

                Tache::Appeler(nom) => {
                    let x = depiler(&mut valeurs)?;
                    valeurs.push(appliquer_fonction(registre, nom, x)?);
                }

                Tache::Operer(op) => {
                    let vb = depiler(&mut valeurs)?;
                    let va = depiler(&mut valeurs)?;
                    valeurs.push(op.appliquer(va, vb)?);
                }
            }
        }

        depiler(&mut valeurs)
    }

    /// Détache les sous-arbres directs (remplacés par une feuille).
    fn detacher_enfants(&mut self, pile: &mut Vec<Expr>) {
        match self {
            Expr::Appel(_, x) => pile.push(std::mem::replace(&mut **x, Expr::Nombre(0.0))),
            Expr::Binaire(_, a, b) => {
                pile.push(std::mem::replace(&mut **a, Expr::Nombre(0.0)));
                pile.push(std::mem::replace(&mut **b, Expr::Nombre(0.0)));
            }
            Expr::Nombre(_) | Expr::Var(_) => {}
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pile = Vec::new();
        self.detacher_enfants(&mut pile);
        while let Some(mut e) = pile.pop() {
            e.detacher_enfants(&mut pile);
        }
    }
}

/// Applique une fonction du registre.
/// Fonction utilisateur : corps évalué avec le paramètre lié (puis restauré).
pub fn appliquer_fonction(registre: &mut Registre, nom: &str, x: f64) -> Resultat<f64> {
    let fonction = registre
        .fonction(nom)
        .cloned()
        .ok_or_else(|| malformee(format!("fonction inconnue '{nom}'")))?;

    match fonction {
        Fonction::Native(f) => f(x, &registre.reglages),
        Fonction::Utilisateur { corps, param } => {
            registre.avec_appel(|r| r.avec_liaison(&param, x, |r| evaluate(&corps, r)))
        }
    }
}

/* ------------------------ Affichage debug ------------------------ */

enum Morceau<'a> {
    Noeud(&'a Expr),
    Car(char),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        let mut pile = vec![Morceau::Noeud(self)];
        while let Some(m) = pile.pop() {
            match m {
                Morceau::Car(c) => f.write_char(c)?,
                Morceau::Noeud(Nombre(n)) => write!(f, "{n}")?,
                Morceau::Noeud(Var(s)) => f.write_str(s)?,
                Morceau::Noeud(Appel(nom, x)) => {
                    write!(f, "{nom}(")?;
                    pile.push(Morceau::Car(')'));
                    pile.push(Morceau::Noeud(&**x));
                }
                Morceau::Noeud(Binaire(op, a, b)) => {
                    f.write_char('(')?;
                    pile.push(Morceau::Car(')'));
                    pile.push(Morceau::Noeud(&**b));
                    pile.push(Morceau::Car(op.symbole()));
                    pile.push(Morceau::Noeud(&**a));
                }
            }
        }
        Ok(())
    }
}
