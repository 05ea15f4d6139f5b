//! Preference tags and the filter chain they trigger.
//!
//! Raw shopper text is tokenized on commas into normalized tokens. Tokens are
//! mapped to [`PreferenceTag`]s through [`TAG_TABLE`], and tags switch on
//! entries of [`FILTER_CHAIN`]. "plain" and "black" both trigger the same
//! black-only color rule; that is an explicit row, not a string coincidence.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::clothing::ClothingItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceTag {
    Plain,
    Black,
    NoPrint,
    NoShoes,
    Shorts,
    UsePhotoHat,
}

/// Normalized token → tag.
pub const TAG_TABLE: &[(&str, PreferenceTag)] = &[
    ("plain", PreferenceTag::Plain),
    ("black", PreferenceTag::Black),
    ("no print", PreferenceTag::NoPrint),
    ("no shoes", PreferenceTag::NoShoes),
    ("shorts", PreferenceTag::Shorts),
    ("use photo hat", PreferenceTag::UsePhotoHat),
];

/// A single narrowing step over the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Keep items whose color contains the needle.
    ColorContains(&'static str),
    /// Keep items whose name contains the needle.
    NameContains(&'static str),
    /// Drop items whose name contains the needle.
    NameExcludes(&'static str),
}

impl Predicate {
    /// Needles are lower-case; both sides are compared case-insensitively.
    pub fn admits(&self, item: &ClothingItem) -> bool {
        match self {
            Predicate::ColorContains(needle) => item.color.to_lowercase().contains(needle),
            Predicate::NameContains(needle) => item.name.to_lowercase().contains(needle),
            Predicate::NameExcludes(needle) => !item.name.to_lowercase().contains(needle),
        }
    }
}

/// Ordered filter chain. A row fires when any of its trigger tags is present.
pub const FILTER_CHAIN: &[(&[PreferenceTag], Predicate)] = &[
    (
        &[PreferenceTag::Plain, PreferenceTag::Black],
        Predicate::ColorContains("black"),
    ),
    (&[PreferenceTag::NoPrint], Predicate::NameExcludes("print")),
    (&[PreferenceTag::NoShoes], Predicate::NameExcludes("shoes")),
    (&[PreferenceTag::Shorts], Predicate::NameContains("shorts")),
    (&[PreferenceTag::UsePhotoHat], Predicate::NameContains("hat")),
];

/// Parsed shopper preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub tags: BTreeSet<PreferenceTag>,
    /// Tokens with no table entry. They never filter anything.
    pub unrecognized: Vec<String>,
}

impl Preferences {
    pub fn parse(raw: &str) -> Self {
        let mut prefs = Preferences::default();

        for token in raw
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
        {
            match TAG_TABLE.iter().find(|(key, _)| *key == token) {
                Some((_, tag)) => {
                    prefs.tags.insert(*tag);
                }
                None => prefs.unrecognized.push(token),
            }
        }

        prefs
    }

    pub fn has(&self, tag: PreferenceTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Predicates switched on by these preferences, in chain order.
    pub fn active_predicates(&self) -> impl Iterator<Item = Predicate> + '_ {
        FILTER_CHAIN
            .iter()
            .filter(|(triggers, _)| triggers.iter().any(|t| self.has(*t)))
            .map(|(_, predicate)| *predicate)
    }
}
