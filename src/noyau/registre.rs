// src/noyau/registre.rs
//
// Registre des variables : lettre -> slot (index dans le vecteur de valeurs).
//
// - TableVariables : valeur explicite, passée au parse (jamais modifiée pendant un parse)
// - registre par défaut : partagé par tout le processus, derrière un Mutex
//   (même schéma OnceLock<Mutex<…>> que les caches du noyau)
//
// ATTENTION : oublier / ajouter une lettre dans le registre par défaut
// change le résultat de TOUS les parse suivants qui l’utilisent.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurRegistre {
    #[error("nom de variable invalide: {0:?} (une lettre ASCII est attendue)")]
    NomInvalide(char),
}

/// Table lettre -> slot. Par défaut : x -> 0, y -> 1, z -> 2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableVariables {
    slots: BTreeMap<char, usize>,
}

impl Default for TableVariables {
    fn default() -> Self {
        let slots = [('x', 0), ('y', 1), ('z', 2)].into_iter().collect();
        Self { slots }
    }
}

impl TableVariables {
    /// Table sans aucune variable (seuls les nombres seront acceptés).
    pub fn vide() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    pub fn slot_of(&self, lettre: char) -> Option<usize> {
        self.slots.get(&lettre).copied()
    }

    pub fn contient(&self, lettre: char) -> bool {
        self.slots.contains_key(&lettre)
    }

    /// Lettre associée à un slot (la première dans l’ordre alphabétique si plusieurs).
    pub fn letter_of(&self, slot: usize) -> Option<char> {
        self.slots
            .iter()
            .find(|(_, s)| **s == slot)
            .map(|(lettre, _)| *lettre)
    }

    /// Ajoute (ou remplace) une lettre. Retourne l’ancien slot éventuel.
    pub fn register(&mut self, lettre: char, slot: usize) -> Result<Option<usize>, ErreurRegistre> {
        if !lettre.is_ascii_alphabetic() {
            return Err(ErreurRegistre::NomInvalide(lettre));
        }
        Ok(self.slots.insert(lettre, slot))
    }

    /// Retire une lettre. Retourne son slot si elle existait.
    pub fn forget(&mut self, lettre: char) -> Option<usize> {
        self.slots.remove(&lettre)
    }

    pub fn lettres(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.slots.iter().map(|(l, s)| (*l, *s))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/* ------------------------ Registre par défaut (processus) ------------------------ */

static REGISTRE: OnceLock<Mutex<TableVariables>> = OnceLock::new();

fn registre() -> MutexGuard<'static, TableVariables> {
    REGISTRE
        .get_or_init(|| Mutex::new(TableVariables::default()))
        .lock()
        // la table reste cohérente même si un thread a paniqué en la tenant
        .unwrap_or_else(PoisonError::into_inner)
}

/// Copie figée du registre par défaut (utilisée par un parse du début à la fin).
pub fn snapshot() -> TableVariables {
    registre().clone()
}

pub fn slot_of(lettre: char) -> Option<usize> {
    registre().slot_of(lettre)
}

pub fn forget(lettre: char) -> Option<usize> {
    let ancien = registre().forget(lettre);
    if let Some(slot) = ancien {
        log::info!("registre: variable {lettre:?} (slot {slot}) oubliée");
    }
    ancien
}

pub fn register(lettre: char, slot: usize) -> Result<Option<usize>, ErreurRegistre> {
    let ancien = registre().register(lettre, slot)?;
    log::info!("registre: variable {lettre:?} -> slot {slot}");
    Ok(ancien)
}
