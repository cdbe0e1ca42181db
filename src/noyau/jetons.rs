// src/noyau/jetons.rs
//
// Découpage en jetons + multiplication implicite.
//
// Règles du découpage (de gauche à droite) :
// - espaces ignorés
// - à chaque position, on essaie chaque nom connu (du plus long au plus court)
// - sinon la plus longue suite de chiffres ASCII => Nombre
// - sinon un des 7 symboles ^ + - * / ( )
// - sinon le caractère est ignoré (tolérance voulue, pas une erreur)
//
// NOTE: le point décimal n'est PAS un chiffre : "1.5" donne deux nombres (1 et 5),
// que l'évaluation refusera ensuite (deux valeurs sans opérateur).

use super::erreurs::{malformee, Resultat};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Nombre(f64),

    // Variable ou fonction : c'est le registre qui tranche.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons. `noms` doit être trié du plus long au plus court
/// (cf. `Registre::noms_connus`).
pub fn tokenize(s: &str, noms: &[String]) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let mut i: usize = 0;

    'jetons: while i < s.len() {
        let reste = &s[i..];
        let Some(c) = reste.chars().next() else {
            break;
        };

        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }

        // Noms connus (le plus long d'abord)
        for nom in noms.iter().filter(|n| !n.is_empty()) {
            if reste.starts_with(nom.as_str()) {
                out.push(Tok::Ident(nom.clone()));
                i += nom.len();
                continue 'jetons;
            }
        }

        // Nombre : chiffres ASCII seulement
        let chiffres = reste.bytes().take_while(u8::is_ascii_digit).count();
        if chiffres != 0 {
            let texte = &reste[..chiffres];
            let n = texte
                .parse::<f64>()
                .map_err(|_| malformee(format!("nombre invalide '{texte}'")))?;
            out.push(Tok::Nombre(n));
            i += chiffres;
            continue;
        }

        // Opérateurs et parenthèses
        let op = match c {
            '^' => Some(Tok::Caret),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            _ => None,
        };
        if let Some(op) = op {
            out.push(op);
        }
        i += c.len_utf8();
    }

    Ok(out)
}

/// Insère `*` entre deux jetons voisins quand :
/// - à gauche : un nombre, une variable ou `)`
/// - à droite : une variable ou `(`
///
/// Un nom de fonction à droite ne déclenche rien : `sin(x)` ne devient jamais `sin*(x)`.
pub fn multiplication_implicite(
    jetons: Vec<Tok>,
    est_fonction: impl Fn(&str) -> bool,
) -> Vec<Tok> {
    let est_variable = |t: &Tok| matches!(t, Tok::Ident(nom) if !est_fonction(nom.as_str()));

    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len());
    for tok in jetons {
        if let Some(prec) = out.last() {
            let gauche = matches!(prec, Tok::Nombre(_) | Tok::RPar) || est_variable(prec);
            let droite = matches!(tok, Tok::LPar) || est_variable(&tok);
            if gauche && droite {
                out.push(Tok::Star);
            }
        }
        out.push(tok);
    }
    out
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Nombre(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
