// src/noyau/format.rs
//
// Affichage d’un arbre.
// - Display        : tout parenthésé, relisible tel quel par parse_equation
// - format_expr_pretty : parenthèses seulement quand elles changent le découpage

use std::fmt;

use super::expr::Expr;

/* ------------------------ Forme parenthésée (relisible) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // un nombre négatif n’est lisible qu’en début de groupe => "(-3)"
            Expr::Number(v) if v.is_sign_negative() => write!(f, "({v})"),
            Expr::Number(v) => write!(f, "{v}"),
            Expr::Variable { nom, .. } => write!(f, "{nom}"),
            Expr::Addition {
                left,
                right,
                negated,
            } => {
                let op = if *negated { '-' } else { '+' };
                write!(f, "({left}{op}{right})")
            }
            Expr::Multiplication {
                left,
                right,
                inverted,
            } => {
                let op = if *inverted { '/' } else { '*' };
                write!(f, "({left}{op}{right})")
            }
            Expr::Power { left, right } => write!(f, "({left}^{right})"),
        }
    }
}

/* ------------------------ Forme “jolie” ------------------------ */

/// Rang de liaison : plus c’est haut, plus ça lie fort.
/// Une négation ou un nombre négatif hors racine est toujours entouré de
/// parenthèses : il se comporte comme un atome.
fn rang(e: &Expr) -> u8 {
    if e.as_negation().is_some() {
        return 4;
    }
    match e {
        Expr::Addition { .. } => 1,
        Expr::Multiplication { .. } => 2,
        Expr::Power { .. } => 3,
        Expr::Number(_) | Expr::Variable { .. } => 4,
    }
}

/// Forme compacte : "2+3*4", "-x", "(10-3)-2".
///
/// Le découpage se fait au PREMIER opérateur de la catégorie la moins liante,
/// donc un opérande GAUCHE de même catégorie doit être parenthésé,
/// un opérande droit non.
pub fn format_expr_pretty(e: &Expr) -> String {
    pretty(e, true)
}

fn pretty(e: &Expr, racine: bool) -> String {
    let signe_en_tete = |texte: String| {
        if racine {
            texte
        } else {
            format!("({texte})")
        }
    };

    // "-x" / "-3" seulement devant un atome : le scanner ne fusionne pas "-(".
    // Sinon la forme 0-… est gardée telle quelle.
    if let Some(x) = e.as_negation() {
        let texte = if atome_positif(x) {
            format!("-{}", pretty(x, false))
        } else {
            format!("0-{}", operande(x, 2, false))
        };
        return signe_en_tete(texte);
    }

    match e {
        Expr::Number(v) if v.is_sign_negative() => signe_en_tete(format!("{v}")),
        Expr::Number(v) => format!("{v}"),
        Expr::Variable { nom, .. } => nom.to_string(),
        Expr::Addition {
            left,
            right,
            negated,
        } => binaire(e, left, if *negated { '-' } else { '+' }, right),
        Expr::Multiplication {
            left,
            right,
            inverted,
        } => binaire(e, left, if *inverted { '/' } else { '*' }, right),
        Expr::Power { left, right } => binaire(e, left, '^', right),
    }
}

/// Variable, ou nombre sans signe : fusionnable avec un '-' en tête de groupe.
fn atome_positif(e: &Expr) -> bool {
    match e {
        Expr::Variable { .. } => true,
        Expr::Number(v) => !v.is_sign_negative(),
        _ => false,
    }
}

fn binaire(parent: &Expr, left: &Expr, op: char, right: &Expr) -> String {
    let r = rang(parent);
    format!("{}{op}{}", operande(left, r, true), operande(right, r, false))
}

fn operande(e: &Expr, rang_parent: u8, gauche: bool) -> String {
    let rang_e = rang(e);
    let texte = pretty(e, false);
    if rang_e < rang_parent || (gauche && rang_e == rang_parent && rang_e < 4) {
        format!("({texte})")
    } else {
        texte
    }
}
