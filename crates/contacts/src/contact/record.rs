//! Контактная запись.

/// Запись одного контакта: упорядоченные пары «имя поля → значение».
///
/// Инварианты:
/// - каждое имя поля встречается не больше одного раза;
/// - значения хранятся обрезанными, пустые значения не хранятся вовсе;
/// - порядок полей — порядок их первой вставки, перезапись не двигает поле.
///
/// # Пример
///
/// ```
/// use contacts::contact::Contact;
///
/// let mut contact = Contact::new();
/// contact.insert("firstName", "  John ");
/// contact.insert("lastName", "");
///
/// assert_eq!(contact.get("firstName"), Some("John"));
/// assert!(!contact.contains("lastName"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    fields: Vec<(String, String)>,
}

impl Contact {
    /// Создаёт пустую запись.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Записывает значение поля.
    ///
    /// Значение обрезается; если после этого оно пустое, запись не меняется
    /// и возвращается `false`. Существующее поле перезаписывается на месте.
    pub fn insert(&mut self, name: impl Into<String>, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        let name = name.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value.to_string(),
            None => self.fields.push((name, value.to_string())),
        }
        true
    }

    /// Возвращает значение поля, если оно есть.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Есть ли в записи такое поле.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(key, _)| key == name)
    }

    /// Имена полей в порядке вставки.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Пары «поле, значение» в порядке вставки.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Количество полей.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Пуста ли запись.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for Contact {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut contact = Self::new();
        for (name, value) in iter {
            contact.insert(name, value.as_ref());
        }
        contact
    }
}
