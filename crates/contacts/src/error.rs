//! Модуль ошибок конвертации контактов.
//!
//! Ошибки уровня полей не существуют: поле, которое не удалось разобрать,
//! просто отсутствует в записи. Всё, что описано здесь, прерывает пакет целиком.

use thiserror::Error;

/// Главная ошибка конвертации.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Документ не похож на vCard: нет расширения `.vcf` и нет маркера `BEGIN:VCARD`.
    #[error("Unsupported file format: {name}")]
    UnsupportedFormat {
        /// Имя документа, на котором остановилась обработка.
        name: String,
    },

    /// В пакете больше документов, чем разрешено настройками.
    #[error("Too many files: {actual} submitted, at most {limit} allowed")]
    TooManyDocuments {
        /// Разрешённый максимум.
        limit: usize,
        /// Фактическое количество документов.
        actual: usize,
    },

    /// Ошибка ввода/вывода при записи таблицы.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка CSV-писателя.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Итоговая таблица оказалась невалидной UTF-8 строкой.
    #[error("Invalid UTF-8 in output: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Удобный alias для Result с ConvertError.
pub type ConvertResult<T> = Result<T, ConvertError>;
