//! Словарь имён полей и классификация квалификаторов.

/// Фамилия (первый компонент `N`).
pub const LAST_NAME: &str = "lastName";
/// Имя (второй компонент `N`).
pub const FIRST_NAME: &str = "firstName";
/// Отчество / второе имя.
pub const MIDDLE_NAME: &str = "middleName";
/// Префикс обращения («Dr.», «Mr.»).
pub const PREFIX: &str = "prefix";
/// Суффикс («Jr.», «PhD»).
pub const SUFFIX: &str = "suffix";
/// Отображаемое имя (`FN`).
pub const FULL_NAME: &str = "fullName";

pub const MOBILE_PHONE: &str = "mobilePhone";
pub const WORK_PHONE: &str = "workPhone";
pub const HOME_PHONE: &str = "homePhone";
pub const WORK_EMAIL: &str = "workEmail";
pub const HOME_EMAIL: &str = "homeEmail";

/// Название организации (первый компонент `ORG`).
pub const ORGANIZATION: &str = "organization";
/// Подразделение (второй компонент `ORG`).
pub const DEPARTMENT: &str = "department";
pub const JOB_TITLE: &str = "jobTitle";
pub const NOTES: &str = "notes";
pub const WEBSITE: &str = "website";
pub const BIRTHDAY: &str = "birthday";

/// Компоненты `N` в позиционном порядке.
pub const NAME_COMPONENTS: [&str; 5] = [LAST_NAME, FIRST_NAME, MIDDLE_NAME, PREFIX, SUFFIX];

/// Суффиксы полей адреса в позиционном порядке `ADR`.
///
/// Полное имя поля — префикс адреса плюс суффикс: `homeStreet`, `address2City`.
pub const ADDRESS_COMPONENTS: [&str; 7] =
    ["PoBox", "ExtAddr", "Street", "City", "Region", "PostalCode", "Country"];

/// Квалификатор повторяемого поля (`TYPE=cell`, `TYPE=work`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// `cell` или `mobile`.
    Mobile,
    /// `work`.
    Work,
    /// `home`.
    Home,
}

impl Qualifier {
    /// Префикс имени поля для квалификатора.
    ///
    /// # Пример
    /// ```
    /// use contacts::contact::Qualifier;
    /// assert_eq!(Qualifier::Mobile.as_str(), "mobile");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Work => "work",
            Self::Home => "home",
        }
    }

    /// Подстроки, по которым квалификатор узнаётся в параметрах свойства.
    const fn needles(&self) -> &'static [&'static str] {
        match self {
            Self::Mobile => &["cell", "mobile"],
            Self::Work => &["work"],
            Self::Home => &["home"],
        }
    }
}

/// Вид повторяемого поля карточки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repeatable {
    /// `TEL`
    Phone,
    /// `EMAIL`
    Email,
    /// `ADR`
    Address,
}

impl Repeatable {
    /// Допустимые квалификаторы в порядке приоритета.
    const fn qualifiers(&self) -> &'static [Qualifier] {
        match self {
            Self::Phone => &[Qualifier::Mobile, Qualifier::Work, Qualifier::Home],
            Self::Email | Self::Address => &[Qualifier::Work, Qualifier::Home],
        }
    }

    /// Основа имени поля: `phone`, `email`, `address`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
        }
    }

    const fn suffix(&self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Address => "",
        }
    }

    /// Определяет квалификатор по тексту параметров свойства.
    ///
    /// Сравнение без учёта регистра, по вхождению подстроки; побеждает первый
    /// квалификатор в порядке приоритета.
    ///
    /// # Пример
    /// ```
    /// use contacts::contact::{Qualifier, Repeatable};
    ///
    /// assert_eq!(Repeatable::Phone.classify(";TYPE=WORK,CELL"), Some(Qualifier::Mobile));
    /// assert_eq!(Repeatable::Email.classify(";TYPE=INTERNET"), None);
    /// ```
    #[must_use]
    pub fn classify(&self, params: &str) -> Option<Qualifier> {
        let params = params.to_lowercase();
        self.qualifiers()
            .iter()
            .copied()
            .find(|q| q.needles().iter().any(|needle| params.contains(needle)))
    }

    /// Имя поля (для адреса — префикс полей) для квалифицированного вхождения.
    ///
    /// # Пример
    /// ```
    /// use contacts::contact::{Qualifier, Repeatable};
    ///
    /// assert_eq!(Repeatable::Phone.qualified(Qualifier::Mobile), "mobilePhone");
    /// assert_eq!(Repeatable::Address.qualified(Qualifier::Home), "home");
    /// ```
    #[must_use]
    pub fn qualified(&self, qualifier: Qualifier) -> String {
        format!("{}{}", qualifier.as_str(), self.suffix())
    }

    /// Имя поля переполнения с 1-based номером: `phone1`, `email2`, `address3`.
    #[must_use]
    pub fn overflow(&self, n: usize) -> String {
        format!("{}{n}", self.as_str())
    }
}

/// Имя поля компонента адреса: `address_field("work", "City") == "workCity"`.
#[must_use]
pub fn address_field(prefix: &str, component: &str) -> String {
    format!("{prefix}{component}")
}
