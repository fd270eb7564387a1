//! # xtask - Автоматизация сборки проекта
//!
//! Команды для проверки воркспейса и прогона конвертера на фикстурах.
//!
//! См. [`HELP_TEXT`] для списка команд.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use xshell::{Shell, cmd};

/// Текст справки для команды xtask.
pub const HELP_TEXT: &str = r#"xtask

Использование:
  cargo run -p xtask -- <команда>

Команды:
  help         Показать это сообщение
  fmt          Запустить rustfmt
  fmt-check    Проверить форматирование (CI)
  clippy       Запустить clippy (воркспейс)
  test         Запустить тесты через nextest (воркспейс)
  ci           Запустить fmt-check + clippy + test (профиль CI)
  smoke        Сконвертировать все .vcf фикстуры в target/smoke/contacts.csv

Примечание:
  cargo-nextest устанавливается автоматически при первом запуске тестов
"#;

/// Каталог с фикстурами конвертера относительно корня проекта.
const FIXTURES_DIR: &str = "tools/converter/tests/fixtures";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "help".to_string());

    let sh = Shell::new()?;
    sh.change_dir(project_root()?);

    match cmd.as_str() {
        "help" | "-h" | "--help" => help(),
        "fmt" => Ok(cmd!(sh, "cargo +nightly fmt --all").run()?),
        "fmt-check" => Ok(cmd!(sh, "cargo +nightly fmt --all -- --check").run()?),
        "clippy" => Ok(cmd!(sh, "cargo +nightly clippy --workspace -- -D warnings").run()?),
        "test" => {
            ensure_nextest(&sh)?;
            cmd!(sh, "cargo nextest run --workspace").run()?;
            // nextest не запускает doctests
            cmd!(sh, "cargo +nightly test --workspace --doc").run()?;
            Ok(())
        }
        "ci" => {
            ensure_nextest(&sh)?;
            cmd!(sh, "cargo +nightly fmt --all -- --check").run()?;
            cmd!(sh, "cargo +nightly clippy --workspace -- -D warnings").run()?;
            // e2e тестам нужен собранный vcf2csv
            cmd!(sh, "cargo build --workspace").run()?;
            cmd!(sh, "cargo nextest run --workspace --profile ci").run()?;
            cmd!(sh, "cargo +nightly test --workspace --doc").run()?;
            Ok(())
        }
        "smoke" => smoke(&sh),
        other => bail!("Неизвестная команда: {other}\n\nЗапустите: cargo run -p xtask -- help"),
    }
}

/// Показать сообщение справки.
fn help() -> Result<()> {
    println!("{}", HELP_TEXT);
    Ok(())
}

/// Прогнать `vcf2csv` по всем `.vcf` фикстурам одним пакетом.
///
/// Результат пишется в `target/smoke/contacts.csv`; команда падает, если
/// таблица получилась пустой.
fn smoke(sh: &Shell) -> Result<()> {
    let root = project_root()?;
    let inputs = vcf_fixtures(&root.join(FIXTURES_DIR))?;
    ensure!(!inputs.is_empty(), "в {FIXTURES_DIR} нет .vcf файлов");

    let out_dir = root.join("target/smoke");
    fs::create_dir_all(&out_dir)?;
    let output = out_dir.join("contacts.csv");

    cmd!(sh, "cargo run --quiet -p converter -- {inputs...} --output {output}").run()?;

    let table = fs::read_to_string(&output)
        .with_context(|| format!("не удалось прочитать {}", output.display()))?;
    let header = table.lines().next().unwrap_or_default();
    ensure!(!header.is_empty(), "конвертер вернул пустую таблицу");

    eprintln!("Колонки: {}", header.split(',').count());
    eprintln!("Строк данных: {}", table.lines().count().saturating_sub(1));
    eprintln!("  -> {}", output.display());
    Ok(())
}

/// Найти `.vcf` файлы в каталоге, отсортированные по имени.
fn vcf_fixtures(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("не удалось открыть {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("vcf")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Получить корневую директорию проекта.
///
/// Корень — родитель директории манифеста этого крейта.
///
/// # Ошибки
///
/// Возвращает ошибку, если:
/// - Переменная окружения CARGO_MANIFEST_DIR не установлена
/// - Директория манифеста не имеет родительской директории
fn project_root() -> Result<PathBuf> {
    Ok(std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)?
        .parent()
        .context("CARGO_MANIFEST_DIR не имеет родительской директории")?
        .to_path_buf())
}

/// Проверить наличие cargo-nextest и установить при необходимости.
fn ensure_nextest(sh: &Shell) -> Result<()> {
    // Без ignore_status(): неуспешный код возврата превращается в Err
    if cmd!(sh, "cargo nextest --version").quiet().run().is_ok() {
        return Ok(());
    }

    eprintln!("cargo-nextest не найден, устанавливаю...");
    cmd!(sh, "cargo install cargo-nextest --locked").run()?;
    eprintln!("cargo-nextest успешно установлен");
    Ok(())
}
