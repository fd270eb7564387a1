//! Модель контактной записи.
//!
//! Запись не имеет фиксированной схемы: это упорядоченное отображение
//! «имя поля → значение», где имена берутся из закрытого словаря
//! ([`fields`]) или строятся из счётчика переполнения (`phone1`, `email2`,
//! `address1Street`, ...).

pub mod fields;
mod record;

pub use fields::{Qualifier, Repeatable};
pub use record::Contact;
