// src/noyau/implicite.rs
//
// Multiplication implicite : "3x" -> "3*x", ")(" -> ")*(", "2(x+1)" -> "2*(x+1)".
//
// Entrée : texte DÉJÀ validé (aucun jeton inconnu).

use super::jetons::{scan_first, TokenKind};
use super::registre::TableVariables;

/// Juxtaposition qui vaut une multiplication ?
fn multiplication_implicite(avant: TokenKind, apres: TokenKind) -> bool {
    use TokenKind::*;

    matches!(avant, Number | Variable | BracketClose)
        && matches!(apres, Number | Variable | BracketOpen)
}

/// Insère un '*' entre deux jetons juxtaposés.
pub fn insert_implicit_multiplication(chars: &[char], table: &TableVariables) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(chars.len() + chars.len() / 2);
    if chars.is_empty() {
        return out;
    }

    let mut prev = scan_first(chars, 0, true, table);
    if prev.is_unknown() {
        out.extend_from_slice(chars);
        return out;
    }
    out.extend_from_slice(&chars[..prev.length]);
    let mut i = prev.length;

    while i < chars.len() {
        let next = scan_first(chars, i, prev.kind == TokenKind::BracketOpen, table);
        if next.is_unknown() {
            // impossible après validation : on recopie le reste tel quel
            out.extend_from_slice(&chars[i..]);
            break;
        }

        if multiplication_implicite(prev.kind, next.kind) {
            log::debug!("multiplication implicite insérée à la position {i}");
            out.push('*');
        }

        out.extend_from_slice(&chars[i..i + next.length]);
        prev = next;
        i += next.length;
    }

    out
}
