// src/noyau/expr.rs
//
// Arbre d’expression (flottants double précision).
// - Number   : littéral
// - Variable : slot dans le vecteur de valeurs (+ lettre lue, pour l’affichage)
// - Addition / Multiplication : drapeau de signe / d’inverse
// - Power
//
// Chaque noeud possède ses enfants (Box) : pas de partage, pas de cycle.
// Un arbre construit n’est plus jamais modifié.

use std::collections::BTreeSet;

use num_traits::Float;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),

    Variable {
        slot: usize,
        nom: char,
    },

    /// left + right, ou left - right si `negated`
    Addition {
        left: Box<Expr>,
        right: Box<Expr>,
        negated: bool,
    },

    /// left * right, ou left * (1/right) si `inverted`
    Multiplication {
        left: Box<Expr>,
        right: Box<Expr>,
        inverted: bool,
    },

    Power {
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn addition(left: Expr, right: Expr, negated: bool) -> Expr {
        Expr::Addition {
            left: Box::new(left),
            right: Box::new(right),
            negated,
        }
    }

    pub fn multiplication(left: Expr, right: Expr, inverted: bool) -> Expr {
        Expr::Multiplication {
            left: Box::new(left),
            right: Box::new(right),
            inverted,
        }
    }

    pub fn power(left: Expr, right: Expr) -> Expr {
        Expr::Power {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// -x est construit comme 0 - x.
    pub fn negation(x: Expr) -> Expr {
        Expr::addition(Expr::Number(0.0), x, true)
    }

    /// Forme 0 - x ? Retourne x.
    pub fn as_negation(&self) -> Option<&Expr> {
        match self {
            Expr::Addition {
                left,
                right,
                negated: true,
            } if matches!(**left, Expr::Number(z) if z == 0.0) => Some(right.as_ref()),
            _ => None,
        }
    }

    /* ------------------------ Évaluation ------------------------ */

    /// Évalue l’arbre en double précision.
    pub fn evaluate(&self, variables: &[f64]) -> f64 {
        self.evaluer_en(variables)
    }

    /// Évaluation générique (f64, f32…).
    ///
    /// - variable hors du vecteur => 0
    /// - division par zéro, puissance hors domaine : sémantique IEEE (inf / NaN), jamais d’erreur
    pub fn evaluer_en<F: Float>(&self, variables: &[F]) -> F {
        match self {
            Expr::Number(v) => num_traits::cast(*v).unwrap_or_else(F::nan),

            Expr::Variable { slot, .. } => variables.get(*slot).copied().unwrap_or_else(F::zero),

            Expr::Addition {
                left,
                right,
                negated,
            } => {
                let a = left.evaluer_en(variables);
                let b = right.evaluer_en(variables);
                if *negated {
                    a - b
                } else {
                    a + b
                }
            }

            Expr::Multiplication {
                left,
                right,
                inverted,
            } => {
                let a = left.evaluer_en(variables);
                let b = right.evaluer_en(variables);
                if *inverted {
                    a * (F::one() / b)
                } else {
                    a * b
                }
            }

            Expr::Power { left, right } => {
                left.evaluer_en(variables).powf(right.evaluer_en(variables))
            }
        }
    }

    /* ------------------------ Inspection ------------------------ */

    /// Slots utilisés par l’arbre (triés, sans doublon).
    pub fn slots(&self) -> Vec<usize> {
        fn collecte(e: &Expr, out: &mut BTreeSet<usize>) {
            match e {
                Expr::Number(_) => {}
                Expr::Variable { slot, .. } => {
                    out.insert(*slot);
                }
                Expr::Addition { left, right, .. }
                | Expr::Multiplication { left, right, .. }
                | Expr::Power { left, right } => {
                    collecte(left, out);
                    collecte(right, out);
                }
            }
        }

        let mut out = BTreeSet::new();
        collecte(self, &mut out);
        out.into_iter().collect()
    }

    /// Nombre de noeuds.
    pub fn taille(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable { .. } => 1,
            Expr::Addition { left, right, .. }
            | Expr::Multiplication { left, right, .. }
            | Expr::Power { left, right } => 1 + left.taille() + right.taille(),
        }
    }
}
