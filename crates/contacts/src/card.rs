//! Разбиение документа на карточки и карточки на свойства.
//!
//! Предоставляет [`Cards`] — итератор по карточкам документа, и
//! [`Card::properties`] — итератор по строкам-свойствам одной карточки.

use std::sync::LazyLock;

use regex::Regex;

/// Маркер начала карточки. Только он определяет границы карточек;
/// `END:VCARD` не учитывается.
pub const START_MARKER: &str = "BEGIN:VCARD";

/// Строка свойства: `[group.]NAME[;params]:value`.
///
/// Значение идёт до конца строки; свёрнутые строки не склеиваются.
static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:([A-Za-z0-9-]+)\.)?([A-Za-z0-9-]+)((?:;[^:\r\n]*)?):([^\r\n]*)")
        .expect("property pattern is valid")
});

/// Одна карточка: текст между своим маркером начала и следующим маркером.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card<'a> {
    body: &'a str,
}

impl<'a> Card<'a> {
    /// Текст карточки без маркера начала.
    #[must_use]
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Свойства карточки в порядке следования строк.
    pub fn properties(&self) -> impl Iterator<Item = Property<'a>> + 'a {
        PROPERTY_RE.captures_iter(self.body).map(|caps| Property {
            group: caps.get(1).map(|m| m.as_str()),
            name: caps.get(2).map_or("", |m| m.as_str()),
            params: caps.get(3).map_or("", |m| m.as_str()),
            value: caps.get(4).map_or("", |m| m.as_str()),
        })
    }
}

/// Свойство карточки, разобранное из одной строки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property<'a> {
    /// Группа (`item1` в `item1.TEL:...`).
    pub group: Option<&'a str>,
    /// Имя свойства как есть (`TEL`, `N`, `X-ABLabel`).
    pub name: &'a str,
    /// Параметры вместе с ведущей `;`, или пустая строка.
    pub params: &'a str,
    /// Сырое значение без обрезки.
    pub value: &'a str,
}

/// Итератор по карточкам документа.
///
/// Текст до первого маркера карточкой не считается; фрагмент после маркера,
/// состоящий только из пробельных символов, пропускается.
///
/// # Пример
///
/// ```
/// use contacts::card::Cards;
///
/// let text = "BEGIN:VCARD\nFN:A\nEND:VCARD\nBEGIN:VCARD\nFN:B\nEND:VCARD\n";
/// let cards: Vec<_> = Cards::new(text).collect();
/// assert_eq!(cards.len(), 2);
/// assert!(cards[1].body().contains("FN:B"));
/// ```
#[derive(Debug, Clone)]
pub struct Cards<'a> {
    rest: Option<&'a str>,
    /// Счётчик выданных карточек.
    cards_read: usize,
}

impl<'a> Cards<'a> {
    /// Создаёт итератор по тексту документа.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let rest = text.find(START_MARKER).map(|start| &text[start + START_MARKER.len()..]);
        Self { rest, cards_read: 0 }
    }

    /// Возвращает количество выданных карточек.
    #[must_use]
    pub fn cards_read(&self) -> usize {
        self.cards_read
    }
}

impl<'a> Iterator for Cards<'a> {
    type Item = Card<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = self.rest?;
            let body = match rest.find(START_MARKER) {
                Some(end) => {
                    self.rest = Some(&rest[end + START_MARKER.len()..]);
                    &rest[..end]
                }
                None => {
                    self.rest = None;
                    rest
                }
            };

            if body.trim().is_empty() {
                continue;
            }

            self.cards_read += 1;
            return Some(Card { body });
        }
    }
}
