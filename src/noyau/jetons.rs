// src/noyau/jetons.rs
//
// Lecture du PREMIER jeton à une position donnée du texte.
//
// Le scanner ne découpe pas tout le texte d’un coup : validation, multiplication
// implicite et construction de l’arbre l’appellent position par position,
// avec un drapeau "début de groupe" (début du texte ou juste après '(').
//
// Signes :
// - '-' / '+' en début de groupe, suivis d’un nombre ou d’une variable,
//   fusionnent avec eux ("-3", "-x", "+2").
// - partout ailleurs, ce sont des opérateurs d’addition.

use super::registre::TableVariables;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Variable,
    AdditionOperator,
    MultiplicationOperator,
    PowerOperator,
    BracketOpen,
    BracketClose,
    Unknown,
}

/// Résultat d’un scan : genre, nombre de caractères consommés, inversion.
///
/// `inverted` marque un jeton issu d’un '-' (addition négative, nombre ou
/// variable négatifs), d’un '/' (multiplication par l’inverse) ou d’un '+'
/// fusionné avec ce qui le suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanResult {
    pub kind: TokenKind,
    pub length: usize,
    pub inverted: bool,
}

impl ScanResult {
    fn inconnu() -> Self {
        Self {
            kind: TokenKind::Unknown,
            length: 0,
            inverted: false,
        }
    }

    fn un(kind: TokenKind, inverted: bool) -> Self {
        Self {
            kind,
            length: 1,
            inverted,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == TokenKind::Unknown
    }
}

/// Classe le jeton qui commence à `at` dans `chars`.
///
/// `Unknown` (longueur 0) = aucun jeton valide ici ; l’appelant doit rejeter le texte.
pub fn scan_first(
    chars: &[char],
    at: usize,
    debut_groupe: bool,
    table: &TableVariables,
) -> ScanResult {
    let Some(&c) = chars.get(at) else {
        return ScanResult::inconnu();
    };

    match c {
        '/' => ScanResult::un(TokenKind::MultiplicationOperator, true),
        '*' => ScanResult::un(TokenKind::MultiplicationOperator, false),
        '^' => ScanResult::un(TokenKind::PowerOperator, false),
        '(' => ScanResult::un(TokenKind::BracketOpen, false),
        ')' => ScanResult::un(TokenKind::BracketClose, false),
        '-' => scan_signe(chars, at, debut_groupe, table, true),
        '+' => scan_signe(chars, at, debut_groupe, table, false),
        '0'..='9' | '.' => scan_nombre(chars, at),
        _ if table.contient(c) => ScanResult::un(TokenKind::Variable, false),
        _ => ScanResult::inconnu(),
    }
}

/// '-' ou '+' : opérateur, ou signe fusionné avec le nombre / la variable qui suit.
fn scan_signe(
    chars: &[char],
    at: usize,
    debut_groupe: bool,
    table: &TableVariables,
    negatif: bool,
) -> ScanResult {
    if !debut_groupe || at + 1 >= chars.len() {
        return ScanResult::un(TokenKind::AdditionOperator, negatif);
    }

    // NOTE: le jeton fusionné est toujours marqué inversé, même pour '+'.
    // La construction de l’arbre relit le caractère de signe elle-même.
    let suite = scan_first(chars, at + 1, false, table);
    match suite.kind {
        TokenKind::Variable => ScanResult {
            kind: TokenKind::Variable,
            length: 2,
            inverted: true,
        },
        TokenKind::Number => ScanResult {
            kind: TokenKind::Number,
            length: suite.length + 1,
            inverted: true,
        },
        _ => ScanResult::inconnu(),
    }
}

/// Nombre décimal : chiffres + au plus un '.'.
/// - s’arrête (sans le consommer) au premier caractère qui n’en fait pas partie
/// - un second '.' rend le jeton invalide ("1.2.3")
/// - un '.' sans aucun chiffre n’est pas un nombre
fn scan_nombre(chars: &[char], at: usize) -> ScanResult {
    let mut i = at;
    let mut point = false;
    let mut chiffres = 0usize;

    while let Some(&c) = chars.get(i) {
        if c == '.' {
            if point {
                return ScanResult::inconnu();
            }
            point = true;
        } else if c.is_ascii_digit() {
            chiffres += 1;
        } else {
            break;
        }
        i += 1;
    }

    if chiffres == 0 {
        return ScanResult::inconnu();
    }

    ScanResult {
        kind: TokenKind::Number,
        length: i - at,
        inverted: false,
    }
}

/// Liste les jetons d’un texte (debug / “démarche”), séparés par des espaces.
///
/// Le drapeau "début de groupe" suit la même règle que la multiplication implicite :
/// vrai pour le premier jeton et juste après '('.
/// S’arrête sur "?" au premier jeton inconnu.
pub fn format_jetons(texte: &str, table: &TableVariables) -> String {
    let chars: Vec<char> = texte.chars().collect();
    let mut out: Vec<String> = Vec::new();

    let mut i = 0;
    let mut debut_groupe = true;
    while i < chars.len() {
        let jeton = scan_first(&chars, i, debut_groupe, table);
        if jeton.is_unknown() {
            out.push("?".to_string());
            break;
        }
        out.push(chars[i..i + jeton.length].iter().collect());
        debut_groupe = jeton.kind == TokenKind::BracketOpen;
        i += jeton.length;
    }

    out.join(" ")
}
