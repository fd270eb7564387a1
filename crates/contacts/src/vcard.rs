//! Card parser: turns document text into contact records.
//!
//! Each card is scanned for a fixed set of properties. Extraction is
//! positional: values are split on `;` without escape handling and folded
//! lines are not joined. A property that does not match
//! the expected shape is skipped; parsing never fails.
//!
//! Fields are written in a fixed category order (name, display name, phones,
//! emails, addresses, organisation, title, note, URL, birthday) regardless of
//! the order of lines in the card, so the header of an export is stable.
//!
//! # Example
//!
//! ```
//! use contacts::vcard::parse;
//!
//! let text = "BEGIN:VCARD\r\n\
//!             N:Doe;John;;;\r\n\
//!             TEL;TYPE=cell:555-0001\r\n\
//!             TEL:555-0002\r\n\
//!             END:VCARD\r\n";
//!
//! let records = parse(text);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].get("lastName"), Some("Doe"));
//! assert_eq!(records[0].get("mobilePhone"), Some("555-0001"));
//! assert_eq!(records[0].get("phone1"), Some("555-0002"));
//! ```

use std::collections::HashSet;

use tracing::trace;

use crate::{
    card::{Card, Cards, Property},
    config::DuplicatePolicy,
    contact::{
        Contact, Qualifier, Repeatable,
        fields::{
            ADDRESS_COMPONENTS, BIRTHDAY, DEPARTMENT, FULL_NAME, JOB_TITLE, NAME_COMPONENTS,
            NOTES, ORGANIZATION, WEBSITE, address_field,
        },
    },
};

/// Parses every card in `text` with the default duplicate policy.
#[must_use]
pub fn parse(text: &str) -> Vec<Contact> {
    CardParser::default().parse(text)
}

/// Parses every card in `text` with an explicit duplicate policy.
#[must_use]
pub fn parse_with(text: &str, duplicates: DuplicatePolicy) -> Vec<Contact> {
    CardParser::new(duplicates).parse(text)
}

/// Stateless card parser.
///
/// Holds only configuration; calling [`parse`](Self::parse) twice on the same
/// text yields equal results.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardParser {
    duplicates: DuplicatePolicy,
}

impl CardParser {
    /// Creates a parser with the given duplicate policy.
    #[must_use]
    pub const fn new(duplicates: DuplicatePolicy) -> Self {
        Self { duplicates }
    }

    /// Returns the duplicate policy.
    #[must_use]
    pub const fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Parses every card of a document, in order.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<Contact> {
        Cards::new(text).map(|card| self.parse_card(&card)).collect()
    }

    /// Extracts one record from one card.
    #[must_use]
    pub fn parse_card(&self, card: &Card<'_>) -> Contact {
        let props: Vec<Property<'_>> = card.properties().collect();
        let mut contact = Contact::new();

        if let Some(prop) = first(&props, "N") {
            let components = prop.value.splitn(NAME_COMPONENTS.len(), ';');
            for (field, value) in NAME_COMPONENTS.iter().zip(components) {
                contact.insert(*field, value);
            }
        }

        if let Some(prop) = first(&props, "FN") {
            contact.insert(FULL_NAME, prop.value);
        }

        let mut slots = Slots::new(self.duplicates);

        for (tag, kind) in [("TEL", Repeatable::Phone), ("EMAIL", Repeatable::Email)] {
            // A blank value still takes its number; `insert` drops the value itself.
            for prop in named(&props, tag) {
                if let Some(field) = slots.claim(kind, prop.params) {
                    contact.insert(field, prop.value);
                }
            }
        }

        for prop in named(&props, "ADR") {
            let components: Vec<&str> =
                prop.value.splitn(ADDRESS_COMPONENTS.len(), ';').collect();
            if components.len() < ADDRESS_COMPONENTS.len() {
                trace!(value = prop.value, "ADR with too few components skipped");
                continue;
            }
            // The counter advances per unqualified ADR even if every component is blank.
            let Some(prefix) = slots.claim(Repeatable::Address, prop.params) else {
                continue;
            };
            for (suffix, value) in ADDRESS_COMPONENTS.iter().zip(components) {
                contact.insert(address_field(&prefix, suffix), value);
            }
        }

        if let Some(prop) = first(&props, "ORG") {
            let mut parts = prop.value.split(';');
            if let Some(organization) = parts.next() {
                contact.insert(ORGANIZATION, organization);
            }
            if let Some(department) = parts.next() {
                contact.insert(DEPARTMENT, department);
            }
        }

        let single = [("TITLE", JOB_TITLE), ("NOTE", NOTES), ("URL", WEBSITE), ("BDAY", BIRTHDAY)];
        for (tag, field) in single {
            if let Some(prop) = first(&props, tag) {
                contact.insert(field, prop.value);
            }
        }

        contact
    }
}

/// Properties with the given name, in card order.
fn named<'p, 'a>(
    props: &'p [Property<'a>],
    name: &'p str,
) -> impl Iterator<Item = &'p Property<'a>> {
    props.iter().filter(move |prop| prop.name == name)
}

/// First property with the given name; single-value fields ignore the rest.
fn first<'p, 'a>(props: &'p [Property<'a>], name: &str) -> Option<&'p Property<'a>> {
    props.iter().find(|prop| prop.name == name)
}

/// Field-name allocation for repeatable properties within one card.
struct Slots {
    duplicates: DuplicatePolicy,
    counters: [usize; 3],
    taken: HashSet<(Repeatable, Qualifier)>,
}

impl Slots {
    fn new(duplicates: DuplicatePolicy) -> Self {
        Self { duplicates, counters: [0; 3], taken: HashSet::new() }
    }

    /// Returns the field name (or address prefix) for one occurrence, or
    /// `None` if the occurrence must be dropped.
    fn claim(&mut self, kind: Repeatable, params: &str) -> Option<String> {
        match kind.classify(params) {
            Some(qualifier) => {
                let first_time = self.taken.insert((kind, qualifier));
                if !first_time && self.duplicates == DuplicatePolicy::KeepFirst {
                    trace!(
                        kind = kind.as_str(),
                        qualifier = qualifier.as_str(),
                        "duplicate qualifier dropped"
                    );
                    return None;
                }
                Some(kind.qualified(qualifier))
            }
            None => {
                let counter = &mut self.counters[kind as usize];
                *counter += 1;
                Some(kind.overflow(*counter))
            }
        }
    }
}
