//! Noyau: équations en texte -> arbre évaluable
//!
//! Organisation interne :
//! - registre.rs   : lettres de variables -> slots (table explicite + registre par défaut)
//! - jetons.rs     : lecture du premier jeton à une position (signes, nombres, opérateurs)
//! - validation.rs : automate à états + équilibre des parenthèses
//! - implicite.rs  : insertion des multiplications implicites ("3x" -> "3*x")
//! - arbre.rs      : découpage récursif au premier opérateur de la catégorie la moins liante
//! - expr.rs       : arbre + évaluation (flottants)
//! - format.rs     : affichage parenthésé (relisible) et forme compacte
//! - eval.rs       : pipeline complet + démarche

pub mod arbre;
pub mod eval;
pub mod expr;
pub mod format;
pub mod implicite;
pub mod jetons;
pub mod registre;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{parse_equation, parse_equation_avec, parse_equation_detail, Demarche, Fonction, ParseResult};
pub use expr::Expr;
pub use registre::TableVariables;
