//! Noyau: pipeline complet
//!
//! texte -> validation (automate) -> multiplications implicites -> arbre -> Fonction
//!
//! Contrat : une entrée mal formée ne panique jamais, elle donne `success() == false`.
//! Un désaccord validation / construction est journalisé (log::error!) et rendu
//! comme un échec : on ne rend jamais un arbre incomplet.

use std::fmt;

use num_traits::Float;

use super::arbre::build;
use super::expr::Expr;
use super::format::format_expr_pretty;
use super::implicite::insert_implicit_multiplication;
use super::jetons::format_jetons;
use super::registre::{self, TableVariables};
use super::validation::validate_chars;

/// Fonction évaluable : enveloppe d’une racine d’arbre.
#[derive(Clone, Debug, PartialEq)]
pub struct Fonction {
    racine: Expr,
}

impl Fonction {
    pub fn new(racine: Expr) -> Self {
        Self { racine }
    }

    pub fn racine(&self) -> &Expr {
        &self.racine
    }

    /// Évalue avec `variables[slot]` (slot absent => 0).
    pub fn evaluate(&self, variables: &[f64]) -> f64 {
        self.racine.evaluate(variables)
    }

    pub fn evaluer_en<F: Float>(&self, variables: &[F]) -> F {
        self.racine.evaluer_en(variables)
    }

    /// Slots lus par la fonction (triés).
    pub fn variables(&self) -> Vec<usize> {
        self.racine.slots()
    }

    pub fn format_pretty(&self) -> String {
        format_expr_pretty(&self.racine)
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.racine)
    }
}

/// Résultat d’un parse : une fonction si et seulement si succès.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    function: Option<Fonction>,
}

impl ParseResult {
    fn echec() -> Self {
        Self { function: None }
    }

    fn reussite(f: Fonction) -> Self {
        Self { function: Some(f) }
    }

    pub fn success(&self) -> bool {
        self.function.is_some()
    }

    pub fn function(&self) -> Option<&Fonction> {
        self.function.as_ref()
    }

    pub fn into_function(self) -> Option<Fonction> {
        self.function
    }
}

/// API publique : parse avec le registre de variables par défaut.
///
/// Le registre est copié au début : une modification concurrente
/// n’affecte pas un parse déjà commencé.
pub fn parse_equation(texte: &str) -> ParseResult {
    let table = registre::snapshot();
    parse_equation_avec(texte, &table)
}

/// Parse avec une table de variables explicite.
pub fn parse_equation_avec(texte: &str, table: &TableVariables) -> ParseResult {
    let chars: Vec<char> = texte.chars().collect();

    if !validate_chars(&chars, table) {
        log::debug!("équation rejetée par la validation: {texte:?}");
        return ParseResult::echec();
    }

    let prepare = insert_implicit_multiplication(&chars, table);
    match build(&prepare, table) {
        Ok(racine) => ParseResult::reussite(Fonction::new(racine)),
        Err(e) => {
            log::error!("équation validée mais non constructible: {texte:?}: {e}");
            ParseResult::echec()
        }
    }
}

/* ------------------------ Démarche (UI / debug) ------------------------ */

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub implicite: String,
    pub arbre: String,
    pub note: String,
}

/// Comme `parse_equation_avec`, mais garde les étapes intermédiaires
/// et un message d’erreur lisible.
pub fn parse_equation_detail(
    texte: &str,
    table: &TableVariables,
) -> Result<(Fonction, Demarche), String> {
    if texte.is_empty() {
        return Err("Entrée vide".into());
    }

    let chars: Vec<char> = texte.chars().collect();
    let jetons = format_jetons(texte, table);

    if !validate_chars(&chars, table) {
        return Err(format!("équation invalide (jetons: {jetons})"));
    }

    let prepare = insert_implicit_multiplication(&chars, table);
    let racine = build(&prepare, table).map_err(|e| format!("erreur interne: {e}"))?;
    let f = Fonction::new(racine);

    let d = Demarche {
        jetons,
        implicite: prepare.iter().collect(),
        arbre: f.to_string(),
        note: "Pipeline: jetons → validation → multiplications implicites → arbre → évaluation."
            .into(),
    };

    Ok((f, d))
}
