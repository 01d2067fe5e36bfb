// src/noyau/validation.rs
//
// Validation d’une équation en UNE passe gauche -> droite :
// automate à états + compteur de parenthèses.
//
// Tourne AVANT l’insertion des multiplications implicites :
// "3 4" est refusé (deux nombres collés), "3x" est accepté.

use super::jetons::{scan_first, ScanResult, TokenKind};
use super::registre::TableVariables;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationState {
    /// Début du texte ou juste après '('.
    Start,
    Numeric,
    VariableSeen,
    EndOfBracket,
    Operator,
    Invalid,
}

impl ValidationState {
    /// Le jeton `kind` est-il permis dans cet état ?
    fn accepte(self, kind: TokenKind) -> bool {
        use TokenKind::*;

        match self {
            ValidationState::Start | ValidationState::Operator => !matches!(
                kind,
                BracketClose | PowerOperator | MultiplicationOperator | AdditionOperator
            ),
            ValidationState::Numeric => kind != Number,
            ValidationState::VariableSeen | ValidationState::EndOfBracket => true,
            ValidationState::Invalid => false,
        }
    }

    /// État atteint après avoir accepté un jeton.
    pub fn suivant(jeton: &ScanResult) -> ValidationState {
        match jeton.kind {
            TokenKind::Variable => ValidationState::VariableSeen,
            TokenKind::Number => ValidationState::Numeric,
            TokenKind::BracketOpen => ValidationState::Start,
            TokenKind::BracketClose => ValidationState::EndOfBracket,
            TokenKind::PowerOperator
            | TokenKind::AdditionOperator
            | TokenKind::MultiplicationOperator => ValidationState::Operator,
            TokenKind::Unknown => ValidationState::Invalid,
        }
    }
}

/// Vrai si le texte est une équation bien formée (pour la table donnée).
pub fn validate(texte: &str, table: &TableVariables) -> bool {
    let chars: Vec<char> = texte.chars().collect();
    validate_chars(&chars, table)
}

pub(crate) fn validate_chars(chars: &[char], table: &TableVariables) -> bool {
    let mut state = ValidationState::Start;
    let mut profondeur: i64 = 0;
    let mut i = 0;

    while i < chars.len() {
        let jeton = scan_first(chars, i, state == ValidationState::Start, table);
        if jeton.is_unknown() || !state.accepte(jeton.kind) {
            return false;
        }

        state = ValidationState::suivant(&jeton);

        match jeton.kind {
            TokenKind::BracketOpen => profondeur += 1,
            TokenKind::BracketClose => {
                profondeur -= 1;
                // ')' avant son '('
                if profondeur < 0 {
                    return false;
                }
            }
            _ => {}
        }

        i += jeton.length;
    }

    profondeur == 0 && !matches!(state, ValidationState::Start | ValidationState::Operator)
}
