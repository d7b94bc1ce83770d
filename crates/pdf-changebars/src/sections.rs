//! Grouping of changed pages into sections and the "next change" relation

use crate::types::{ChangebarError, PageIndex, Result};
use std::collections::BTreeMap;

/// Strictly ascending set of pages carrying a change bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangedPages(Vec<PageIndex>);

impl ChangedPages {
    /// Build from a page list, rejecting anything not strictly ascending.
    pub fn new(pages: Vec<PageIndex>) -> Result<Self> {
        if pages.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ChangebarError::UnorderedPages);
        }
        Ok(Self(pages))
    }

    pub(crate) fn from_sorted(pages: Vec<PageIndex>) -> Self {
        debug_assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
        Self(pages)
    }

    pub fn as_slice(&self) -> &[PageIndex] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = PageIndex> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<PageIndex> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<PageIndex> {
        self.0.last().copied()
    }
}

/// Maximal run of consecutive changed pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pages: Vec<PageIndex>,
}

impl Section {
    fn starting_at(page: PageIndex) -> Self {
        Self { pages: vec![page] }
    }

    pub fn pages(&self) -> &[PageIndex] {
        &self.pages
    }

    pub fn first(&self) -> PageIndex {
        self.pages[0]
    }

    pub fn last(&self) -> PageIndex {
        self.pages[self.pages.len() - 1]
    }

    pub fn is_single_page(&self) -> bool {
        self.pages.len() == 1
    }
}

/// Sections plus the document-wide "next changed page" lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigation {
    pub sections: Vec<Section>,
    /// Next larger changed page; spans section boundaries
    pub next: BTreeMap<PageIndex, PageIndex>,
}

impl Navigation {
    pub fn next_after(&self, page: PageIndex) -> Option<PageIndex> {
        self.next.get(&page).copied()
    }

    /// True when the jump from `page` lands outside its section.
    pub fn jumps_to_new_section(&self, page: PageIndex) -> bool {
        self.next_after(page)
            .is_some_and(|next| next != page.next())
    }
}

/// Partition changed pages into sections in a single pass.
pub fn build_sections(changed: &ChangedPages) -> Navigation {
    let mut navigation = Navigation::default();
    let mut previous: Option<PageIndex> = None;

    for page in changed.iter() {
        match previous {
            Some(prev) => {
                navigation.next.insert(prev, page);
                if page == prev.next() {
                    if let Some(section) = navigation.sections.last_mut() {
                        section.pages.push(page);
                    }
                } else {
                    navigation.sections.push(Section::starting_at(page));
                }
            }
            None => navigation.sections.push(Section::starting_at(page)),
        }
        previous = Some(page);
    }

    navigation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(numbers: &[u32]) -> ChangedPages {
        ChangedPages::new(numbers.iter().map(|&n| PageIndex::new(n).unwrap()).collect()).unwrap()
    }

    fn section_numbers(navigation: &Navigation) -> Vec<Vec<u32>> {
        navigation
            .sections
            .iter()
            .map(|s| s.pages().iter().map(|p| p.get()).collect())
            .collect()
    }

    #[test]
    fn groups_consecutive_runs() {
        let navigation = build_sections(&pages(&[3, 5, 6, 7, 10]));
        assert_eq!(
            section_numbers(&navigation),
            vec![vec![3], vec![5, 6, 7], vec![10]]
        );

        let next: Vec<(u32, u32)> = navigation
            .next
            .iter()
            .map(|(k, v)| (k.get(), v.get()))
            .collect();
        assert_eq!(next, vec![(3, 5), (5, 6), (6, 7), (7, 10)]);
    }

    #[test]
    fn empty_input() {
        let navigation = build_sections(&ChangedPages::default());
        assert!(navigation.sections.is_empty());
        assert!(navigation.next.is_empty());
    }

    #[test]
    fn single_run() {
        let navigation = build_sections(&pages(&[1, 2, 3]));
        assert_eq!(section_numbers(&navigation), vec![vec![1, 2, 3]]);
        assert!(!navigation.jumps_to_new_section(PageIndex::new(1).unwrap()));
        assert!(!navigation.jumps_to_new_section(PageIndex::new(3).unwrap()));
    }

    #[test]
    fn rejects_unordered_input() {
        let unordered = vec![PageIndex::new(4).unwrap(), PageIndex::new(2).unwrap()];
        assert!(matches!(
            ChangedPages::new(unordered),
            Err(ChangebarError::UnorderedPages)
        ));
        let duplicated = vec![PageIndex::new(2).unwrap(), PageIndex::new(2).unwrap()];
        assert!(ChangedPages::new(duplicated).is_err());
    }

    #[test]
    fn partition_laws() {
        let inputs: [&[u32]; 5] = [&[1], &[2, 4, 6], &[1, 2, 3, 9, 10, 12], &[7, 8], &[5, 20, 21, 22, 40]];
        for input in inputs {
            let changed = pages(input);
            let navigation = build_sections(&changed);

            // Concatenation reproduces the input
            let flat: Vec<PageIndex> = navigation
                .sections
                .iter()
                .flat_map(|s| s.pages().iter().copied())
                .collect();
            assert_eq!(flat, changed.as_slice());

            // Runs are consecutive and cannot be merged
            for section in &navigation.sections {
                assert!(section.pages().windows(2).all(|w| w[1] == w[0].next()));
            }
            for pair in navigation.sections.windows(2) {
                assert!(pair[1].first().get() > pair[0].last().get() + 1);
            }

            // Next is defined for all but the last page and always moves forward
            assert_eq!(navigation.next.len(), changed.len() - 1);
            assert!(navigation.next_after(changed.last().unwrap()).is_none());
            for (page, next) in &navigation.next {
                assert!(next > page);
            }
        }
    }
}
