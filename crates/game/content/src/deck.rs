//! Deck lists: authored card counts expanded into a deck order.

use battle_core::{CardCatalog, CatalogError, TemplateId};

/// One line of a deck list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckEntry {
    pub template: TemplateId,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub copies: u32,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

impl DeckEntry {
    pub fn new(template: impl Into<TemplateId>, copies: u32) -> Self {
        Self {
            template: template.into(),
            copies,
        }
    }
}

/// Ordered deck list. Expansion keeps entry order, so the first entry's
/// copies are drawn first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckList {
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, template: impl Into<TemplateId>, copies: u32) -> Self {
        self.entries.push(DeckEntry::new(template, copies));
        self
    }

    pub fn size(&self) -> usize {
        self.entries.iter().map(|entry| entry.copies as usize).sum()
    }

    /// Template ids in draw order, one per copy.
    pub fn expand(&self) -> Vec<TemplateId> {
        self.entries
            .iter()
            .flat_map(|entry| std::iter::repeat_n(entry.template.clone(), entry.copies as usize))
            .collect()
    }

    /// Checks that every listed template exists.
    pub fn validate(&self, catalog: &CardCatalog) -> Result<(), CatalogError> {
        for entry in &self.entries {
            catalog.template(&entry.template)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::CardTemplate;

    #[test]
    fn expand_repeats_in_entry_order() {
        let list = DeckList::new().with("a", 2).with("b", 1).with("c", 0);

        let ids: Vec<_> = list.expand().iter().map(|id| id.as_str().to_owned()).collect();

        assert_eq!(ids, vec!["a", "a", "b"]);
        assert_eq!(list.size(), 3);
    }

    #[test]
    fn validate_reports_first_unknown_template() {
        let catalog = CardCatalog::new().with_template(CardTemplate::new("a", 0));
        let list = DeckList::new().with("a", 1).with("ghost", 1);

        assert_eq!(
            list.validate(&catalog),
            Err(CatalogError::TemplateNotFound("ghost".into()))
        );
    }
}
