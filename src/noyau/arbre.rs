// src/noyau/arbre.rs
//
// Construction de l’arbre (descente récursive par découpage).
//
// Entrée : texte validé + multiplications implicites déjà insérées.
// On travaille sur UN buffer de caractères et des bornes [debut, fin),
// jamais sur des copies de sous-chaînes. Les parenthèses sont appariées
// une seule fois (Tampon) : retirer une couche ou sauter un groupe est O(1).
//
// Pour chaque tranche :
// 1) retirer les parenthèses qui englobent toute la tranche
// 2) catégorie de l’opérateur principal (hors parenthèses) :
//      addition (+ -)  >  multiplication (* /)  >  puissance (^)
// 3) couper au PREMIER opérateur de cette catégorie (gauche -> droite)
// 4) sinon : feuille (nombre ou variable, éventuellement signés)
//
// NOTE associativité : couper au premier opérateur donne un arbre “penché à droite”.
//   10-3-2  =>  10 - (3 - 2)  = 9
//   2^3^2   =>  2 ^ (3 ^ 2)   = 512
// C’est le comportement voulu ; les tests le figent.

use thiserror::Error;

use super::expr::Expr;
use super::registre::TableVariables;

/// Désaccord entre validation et construction : ne doit jamais arriver
/// sur un texte validé.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurConstruction {
    #[error("sous-expression vide (positions {debut}..{fin})")]
    Vide { debut: usize, fin: usize },

    #[error("ni opérateur ni feuille valide: {0:?}")]
    FeuilleInvalide(String),

    #[error("variable absente du registre: {0:?}")]
    VariableInconnue(char),
}

/// Catégories d’opérateurs, de la plus liante à la moins liante.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Categorie {
    Puissance,
    Multiplication,
    Addition,
}

impl Categorie {
    fn de(c: char) -> Option<Categorie> {
        match c {
            '+' | '-' => Some(Categorie::Addition),
            '*' | '/' => Some(Categorie::Multiplication),
            '^' => Some(Categorie::Puissance),
            _ => None,
        }
    }
}

/// Construit l’arbre d’un texte complet.
pub fn build(chars: &[char], table: &TableVariables) -> Result<Expr, ErreurConstruction> {
    Tampon::new(chars).construire(0, chars.len(), table)
}

/// Buffer de caractères + appariement des parenthèses, calculé une seule fois.
pub struct Tampon<'a> {
    chars: &'a [char],
    /// `fermantes[i]` : position de la ')' qui ferme la '(' en `i` (None ailleurs).
    fermantes: Vec<Option<usize>>,
}

impl<'a> Tampon<'a> {
    pub fn new(chars: &'a [char]) -> Self {
        let mut fermantes = vec![None; chars.len()];
        let mut ouvrantes: Vec<usize> = Vec::new();

        for (i, &c) in chars.iter().enumerate() {
            match c {
                '(' => ouvrantes.push(i),
                ')' => {
                    if let Some(o) = ouvrantes.pop() {
                        fermantes[o] = Some(i);
                    }
                }
                _ => {}
            }
        }

        Self { chars, fermantes }
    }

    fn construire(
        &self,
        debut: usize,
        fin: usize,
        table: &TableVariables,
    ) -> Result<Expr, ErreurConstruction> {
        let (debut, fin) = self.retirer_parentheses(debut, fin);
        if debut >= fin {
            return Err(ErreurConstruction::Vide { debut, fin });
        }

        let Some((categorie, i)) = self.operateur_principal(debut, fin) else {
            return feuille(self.chars, debut, fin, table);
        };

        let left = self.construire(debut, i, table)?;
        let right = self.construire(i + 1, fin, table)?;

        let op = self.chars[i];
        Ok(match categorie {
            Categorie::Addition => Expr::addition(left, right, op == '-'),
            Categorie::Multiplication => Expr::multiplication(left, right, op == '/'),
            Categorie::Puissance => Expr::power(left, right),
        })
    }

    /// Retire les couches "( … )" qui englobent toute la tranche.
    /// "((x))" -> "x" ; "(x)*(y)" reste tel quel.
    pub fn retirer_parentheses(&self, mut debut: usize, mut fin: usize) -> (usize, usize) {
        while fin > debut + 1
            && self.chars[debut] == '('
            && self.fermantes[debut] == Some(fin - 1)
        {
            debut += 1;
            fin -= 1;
        }
        (debut, fin)
    }

    /// Opérateur principal de la tranche : (catégorie, position du premier opérateur
    /// de cette catégorie au niveau 0 de parenthèses).
    ///
    /// Un '+' / '-' en première position est le signe du jeton qui suit
    /// ("-3*x", "-x^2"), pas un opérateur. Les groupes "( … )" sont sautés d’un bloc.
    pub fn operateur_principal(&self, debut: usize, fin: usize) -> Option<(Categorie, usize)> {
        // premier opérateur vu, par catégorie (indice = Categorie as usize)
        let mut premiers: [Option<usize>; 3] = [None; 3];

        let mut i = debut;
        while i < fin {
            let c = self.chars[i];
            if c == '(' {
                i = self.fermantes[i].map_or(fin, |f| f + 1);
                continue;
            }
            let signe = i == debut && (c == '+' || c == '-');
            if !signe {
                if let Some(cat) = Categorie::de(c) {
                    premiers[cat as usize].get_or_insert(i);
                }
            }
            i += 1;
        }

        [Categorie::Addition, Categorie::Multiplication, Categorie::Puissance]
            .into_iter()
            .find_map(|cat| premiers[cat as usize].map(|i| (cat, i)))
    }
}

/// Feuille : variable du registre ou littéral décimal, avec signe optionnel.
fn feuille(
    chars: &[char],
    debut: usize,
    fin: usize,
    table: &TableVariables,
) -> Result<Expr, ErreurConstruction> {
    let tranche = &chars[debut..fin];
    let invalide = || ErreurConstruction::FeuilleInvalide(tranche.iter().collect());

    let (negatif, corps) = match tranche.split_first() {
        Some((&'-', reste)) => (true, reste),
        Some((&'+', reste)) => (false, reste),
        _ => (false, tranche),
    };

    if let [lettre] = corps {
        if lettre.is_ascii_alphabetic() {
            let slot = table
                .slot_of(*lettre)
                .ok_or(ErreurConstruction::VariableInconnue(*lettre))?;
            let var = Expr::Variable {
                slot,
                nom: *lettre,
            };
            return Ok(if negatif { Expr::negation(var) } else { var });
        }
    }

    // Littéral : chiffres et '.' seulement (f64::from_str accepterait aussi "inf", "1e5"…)
    if corps.is_empty() || !corps.iter().all(|c| c.is_ascii_digit() || *c == '.') {
        return Err(invalide());
    }

    let texte: String = tranche.iter().collect();
    let valeur: f64 = texte.parse().map_err(|_| invalide())?;
    Ok(Expr::Number(valeur))
}
