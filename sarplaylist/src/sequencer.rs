//! Position de lecture dans une playlist générée
//!
//! Le séquenceur ne fait aucune E/S : il tient l'index courant et décide des
//! transitions. Le lecteur audio (externe) réagit aux changements d'index.

use crate::error::{Error, Result};
use crate::item::PlaylistItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comportement de `next()` sur le dernier élément
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfListPolicy {
    /// Revenir au premier élément
    #[default]
    Wrap,
    /// Générer une nouvelle playlist
    Regenerate,
}

impl EndOfListPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndOfListPolicy::Wrap => "wrap",
            EndOfListPolicy::Regenerate => "regenerate",
        }
    }
}

impl fmt::Display for EndOfListPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndOfListPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrap" => Ok(EndOfListPolicy::Wrap),
            "regenerate" => Ok(EndOfListPolicy::Regenerate),
            other => Err(format!("unknown end-of-list policy '{}'", other)),
        }
    }
}

/// Résultat d'un déplacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nouvel index courant
    Moved(usize),
    /// Fin de liste franchie, retour au début
    Wrapped(usize),
    /// Fin de liste avec la politique `Regenerate` : l'appelant doit fournir
    /// une nouvelle playlist via `replace`
    EndOfList,
    /// Playlist vide
    Empty,
}

impl Transition {
    /// Index courant après la transition, s'il a changé
    pub fn index(&self) -> Option<usize> {
        match self {
            Transition::Moved(index) | Transition::Wrapped(index) => Some(*index),
            Transition::EndOfList | Transition::Empty => None,
        }
    }
}

/// Séquenceur de lecture
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    items: Vec<PlaylistItem>,
    current: Option<usize>,
    policy: EndOfListPolicy,
}

impl Sequencer {
    /// Crée un séquenceur positionné sur le premier élément (s'il existe)
    pub fn new(items: Vec<PlaylistItem>, policy: EndOfListPolicy) -> Self {
        let current = if items.is_empty() { None } else { Some(0) };
        Self {
            items,
            current,
            policy,
        }
    }

    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn policy(&self) -> EndOfListPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: EndOfListPolicy) {
        self.policy = policy;
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_item(&self) -> Option<&PlaylistItem> {
        self.current.and_then(|index| self.items.get(index))
    }

    /// Remplace la playlist entière et revient au début
    pub fn replace(&mut self, items: Vec<PlaylistItem>) {
        self.current = if items.is_empty() { None } else { Some(0) };
        self.items = items;
    }

    /// Élément suivant
    pub fn next(&mut self) -> Transition {
        let Some(current) = self.current else {
            return Transition::Empty;
        };

        if current + 1 < self.items.len() {
            self.current = Some(current + 1);
            return Transition::Moved(current + 1);
        }

        match self.policy {
            EndOfListPolicy::Wrap => {
                self.current = Some(0);
                Transition::Wrapped(0)
            }
            EndOfListPolicy::Regenerate => Transition::EndOfList,
        }
    }

    /// Élément précédent ; depuis le premier, saute au dernier
    pub fn previous(&mut self) -> Transition {
        let Some(current) = self.current else {
            return Transition::Empty;
        };

        if current > 0 {
            self.current = Some(current - 1);
            Transition::Moved(current - 1)
        } else {
            let last = self.items.len() - 1;
            self.current = Some(last);
            Transition::Wrapped(last)
        }
    }

    /// Accès direct à un index
    pub fn jump_to(&mut self, index: usize) -> Result<usize> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.current = Some(index);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarcatalog::Advertisement;

    fn items(n: usize) -> Vec<PlaylistItem> {
        (0..n)
            .map(|i| PlaylistItem::ad(Advertisement::new(format!("Ad {}", i))))
            .collect()
    }

    #[test]
    fn test_next_wraps_at_end() {
        let mut seq = Sequencer::new(items(3), EndOfListPolicy::Wrap);
        assert_eq!(seq.next(), Transition::Moved(1));
        assert_eq!(seq.next(), Transition::Moved(2));
        assert_eq!(seq.next(), Transition::Wrapped(0));
        assert_eq!(seq.current_index(), Some(0));
    }

    #[test]
    fn test_next_requests_regeneration() {
        let mut seq = Sequencer::new(items(1), EndOfListPolicy::Regenerate);
        assert_eq!(seq.next(), Transition::EndOfList);
        assert_eq!(seq.current_index(), Some(0));

        seq.replace(items(2));
        assert_eq!(seq.current_index(), Some(0));
        assert_eq!(seq.next(), Transition::Moved(1));
    }

    #[test]
    fn test_previous_from_first_jumps_to_last() {
        let mut seq = Sequencer::new(items(4), EndOfListPolicy::Wrap);
        assert_eq!(seq.previous(), Transition::Wrapped(3));
        assert_eq!(seq.previous(), Transition::Moved(2));
        assert_eq!(seq.current_item().map(PlaylistItem::name), Some("Ad 2"));
    }

    #[test]
    fn test_jump_to_is_bounds_checked() {
        let mut seq = Sequencer::new(items(2), EndOfListPolicy::Wrap);
        assert_eq!(seq.jump_to(1).unwrap(), 1);
        assert!(matches!(
            seq.jump_to(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(seq.current_index(), Some(1));
    }

    #[test]
    fn test_empty_sequencer() {
        let mut seq = Sequencer::new(Vec::new(), EndOfListPolicy::Wrap);
        assert_eq!(seq.current_index(), None);
        assert_eq!(seq.next(), Transition::Empty);
        assert_eq!(seq.previous(), Transition::Empty);
        assert!(seq.jump_to(0).is_err());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Regenerate".parse::<EndOfListPolicy>().unwrap(), EndOfListPolicy::Regenerate);
        assert!("shuffle".parse::<EndOfListPolicy>().is_err());
    }
}
