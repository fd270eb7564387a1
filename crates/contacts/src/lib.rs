//! Библиотека конвертации контактов vCard в CSV.
//!
//! Крейт состоит из двух этапов, выполняемых строго последовательно:
//!
//! - **Разбор карточек** ([`vcard`]) — текст документа делится на карточки по
//!   маркеру `BEGIN:VCARD`, из каждой карточки извлекается плоская запись
//!   [`Contact`](contact::Contact) «имя поля → значение».
//! - **Сериализация таблицы** ([`table`]) — объединение ключей всех записей
//!   даёт заголовок, каждая запись становится строкой CSV.
//!
//! Модуль [`batch`] связывает этапы: проверяет формат документов, копит
//! записи и выдаёт итоговую таблицу только если весь пакет обработан успешно.
//!
//! # Быстрый старт
//!
//! ```
//! use contacts::batch::{Document, convert};
//! use contacts::config::{ConvertOptions, LineEnding};
//!
//! let doc = Document::new(
//!     "alice.vcf",
//!     "BEGIN:VCARD\nN:Smith;Alice;;;\nTEL;TYPE=cell:555-0101\nEND:VCARD\n",
//! );
//! let options = ConvertOptions { line_ending: LineEnding::Lf, ..ConvertOptions::default() };
//!
//! let export = convert(&[doc], &options).unwrap();
//! assert_eq!(export.csv, "lastName,firstName,mobilePhone\nSmith,Alice,555-0101\n");
//! assert_eq!(export.contacts, 1);
//! ```

pub mod batch;
pub mod card;
pub mod config;
pub mod contact;
pub mod error;
pub mod table;
pub mod vcard;
pub mod writer;

/// Часто используемые типы для CLI и интеграционных тестов.
pub mod prelude {
    pub use crate::{
        batch::{Batch, Document, Export, convert},
        config::{ConvertOptions, DuplicatePolicy, LineEnding},
        contact::Contact,
        error::{ConvertError, ConvertResult},
        table::{Table, serialize},
        vcard::{CardParser, parse},
        writer::TableWriter,
    };
}
