//! Потоковый writer для таблицы контактов.
//!
//! Предоставляет [`TableWriter`] для записи строк CSV в любой тип,
//! реализующий [`Write`]. Заголовок должен быть известен заранее, поэтому
//! writer принимает готовый [`Header`].

use std::io::Write;

use crate::{config::LineEnding, contact::Contact, error::ConvertResult, table::Header};

/// Начальный размер буфера кодировщика строки.
const ROW_BUFFER_CAPACITY: usize = 1024;

/// Потоковый writer CSV-таблицы контактов.
///
/// Экранирование стандартное: ячейка с запятой, кавычкой или переводом строки
/// берётся в кавычки, кавычки внутри удваиваются. Строка из одной пустой
/// ячейки записывается как пустая строка.
///
/// # Пример
///
/// ```
/// use contacts::config::LineEnding;
/// use contacts::contact::Contact;
/// use contacts::table::Header;
/// use contacts::writer::TableWriter;
///
/// let records: Vec<Contact> = vec![
///     [("firstName", "Ann")].into_iter().collect(),
///     [("workEmail", "ann@acme.io")].into_iter().collect(),
/// ];
/// let header = Header::from_records(&records);
///
/// let mut output = Vec::new();
/// let mut writer = TableWriter::new(&mut output, &header, LineEnding::Lf);
/// writer.write_header().unwrap();
/// writer.write_all(&records).unwrap();
/// writer.flush().unwrap();
/// drop(writer);
///
/// assert_eq!(String::from_utf8(output).unwrap(), "firstName,workEmail\nAnn,\n,ann@acme.io\n");
/// ```
pub struct TableWriter<'h, W: Write> {
    out: W,
    /// Настройки кодирования одной строки.
    encoder: csv::WriterBuilder,
    line_ending: LineEnding,
    /// Переиспользуемый буфер закодированной строки.
    row: Vec<u8>,
    header: &'h Header,
    /// Счётчик записанных строк данных.
    records_written: usize,
    /// Флаг: записан ли заголовок.
    header_written: bool,
}

impl<'h, W: Write> TableWriter<'h, W> {
    /// Создаёт новый writer.
    pub fn new(writer: W, header: &'h Header, line_ending: LineEnding) -> Self {
        let mut encoder = csv::WriterBuilder::new();
        encoder.terminator(line_ending.into()).buffer_capacity(ROW_BUFFER_CAPACITY);
        Self {
            out: writer,
            encoder,
            line_ending,
            row: Vec::new(),
            header,
            records_written: 0,
            header_written: false,
        }
    }

    /// Записывает строку заголовка.
    ///
    /// Может вызываться несколько раз, но заголовок записывается только один раз.
    pub fn write_header(&mut self) -> ConvertResult<()> {
        if !self.header_written {
            let header = self.header;
            self.write_row(header.columns())?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Записывает одну запись: по ячейке на каждую колонку заголовка,
    /// пустая строка там, где поля нет.
    pub fn write(&mut self, contact: &Contact) -> ConvertResult<()> {
        let header = self.header;
        let cells: Vec<&str> =
            header.columns().iter().map(|column| contact.get(column).unwrap_or("")).collect();

        // csv пишет единственную пустую ячейку как `""`, а нужна пустая строка
        if matches!(cells.as_slice(), [""]) {
            self.out.write_all(self.line_ending.as_str().as_bytes())?;
        } else {
            self.write_row(cells)?;
        }
        self.records_written += 1;
        Ok(())
    }

    /// Записывает несколько записей.
    pub fn write_all(&mut self, contacts: &[Contact]) -> ConvertResult<()> {
        for contact in contacts {
            self.write(contact)?;
        }
        Ok(())
    }

    /// Принудительно сбрасывает буфер.
    pub fn flush(&mut self) -> ConvertResult<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Возвращает количество записанных строк данных.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Получает ссылку на внутренний writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Извлекает внутренний writer (с предварительным flush).
    pub fn into_inner(mut self) -> ConvertResult<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    /// Кодирует одну строку в буфер и передаёт её во внутренний writer.
    fn write_row<I, T>(&mut self, cells: I) -> ConvertResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.row.clear();
        let mut encoder = self.encoder.from_writer(&mut self.row);
        encoder.write_record(cells)?;
        encoder.flush()?;
        drop(encoder);

        self.out.write_all(&self.row)?;
        Ok(())
    }
}
