//! Calculatrice d'équations: bibliothèque
//!
//! Le noyau est utilisable sans interface : `parse_equation("2x+1")` puis
//! `Fonction::evaluate(&[x, y, z])`.

pub mod noyau;

pub use noyau::{parse_equation, parse_equation_avec, Fonction, ParseResult, TableVariables};
