//! 子命令的实现。所有错误都在这里附上上下文，交给 `main` 统一输出。

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use eaf_processor::{generate_eaf, parse_eaf};
use elan_core::{EafDocument, EafGenerationOptions, ImportOptions, RetimeConfig};
use timing_repair::{ToolboxFile, disambiguate, extract_word_times, import_word_times};
use tracing::info;

use crate::cli::{Cli, Command, ImportArgs};

pub fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => RetimeConfig::load(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => RetimeConfig::default(),
    };

    let mut output_options = config.output;
    if cli.compact {
        output_options.format = false;
    }

    match &cli.command {
        Command::Flexibilize { input, output } => flexibilize(input, output, &output_options),
        Command::ImportWordTimes(args) => {
            let mut import_options = config.import;
            args.apply_overrides(&mut import_options);
            import_toolbox_word_times(args, &import_options, &output_options)
        }
    }
}

fn flexibilize(input: &Path, output: &Path, output_options: &EafGenerationOptions) -> Result<()> {
    ensure_not_overwriting(input, output)?;

    let mut document = read_document(input)?;
    info!("原始时间槽数: {}", document.time_order().len());

    let report = disambiguate(&mut document)
        .with_context(|| format!("无法拆分 {} 中的时间槽", input.display()))?;
    if report.is_unchanged() {
        info!("所有层都已经可以单独对齐");
    } else {
        info!(
            "已处理层: {}，新时间槽数: {}（拆分 {}，插值 {}，未涉及 {}）",
            report.processed_tiers.join(" "),
            report.new_slots,
            report.split,
            report.interpolated,
            report.carried
        );
    }

    write_document(output, &document, output_options)
}

fn import_toolbox_word_times(
    args: &ImportArgs,
    import_options: &ImportOptions,
    output_options: &EafGenerationOptions,
) -> Result<()> {
    ensure_not_overwriting(&args.input, &args.output)?;
    ensure_not_overwriting(&args.toolbox, &args.output)?;

    let mut document = read_document(&args.input)?;

    info!("打开 Toolbox 文件: {}", args.toolbox.display());
    let text = fs::read_to_string(&args.toolbox)
        .with_context(|| format!("无法读取 Toolbox 文件 {}", args.toolbox.display()))?;
    let toolbox = ToolboxFile::parse(&text);

    let table = extract_word_times(&toolbox, import_options)
        .with_context(|| format!("无法从 {} 中提取词级时间", args.toolbox.display()))?;
    info!("找到 {} 条带词级时间的记录", table.len());

    let report = import_word_times(&mut document, &table, import_options)
        .context("无法导入词级时间")?;
    if !report.skipped_references.is_empty() {
        info!("跳过的空记录: {}", report.skipped_references.join(" "));
    }

    write_document(&args.output, &document, output_options)
}

/// 拒绝把结果写到输入文件上。
fn ensure_not_overwriting(input: &Path, output: &Path) -> Result<()> {
    let same = input == output
        || matches!(
            (input.canonicalize(), output.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        );
    if same {
        bail!(
            "输入文件与输出文件相同，不能覆盖输入文件: {}",
            input.display()
        );
    }
    Ok(())
}

fn read_document(path: &Path) -> Result<EafDocument> {
    info!("打开 ELAN 文件: {}", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("无法读取 ELAN 文件 {}", path.display()))?;
    parse_eaf(&text).with_context(|| format!("无法解析 ELAN 文件 {}", path.display()))
}

fn write_document(
    path: &Path,
    document: &EafDocument,
    options: &EafGenerationOptions,
) -> Result<()> {
    let xml = generate_eaf(document, options).context("无法生成 ELAN 文件")?;
    fs::write(path, xml).with_context(|| format!("无法写入 {}", path.display()))?;
    info!("已写入 {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPORTED_EAF: &str = include_str!("../timing_repair/tests/test_data/imported_toolbox.eaf");
    const TOOLBOX: &str = include_str!("../timing_repair/tests/test_data/session.txt");

    fn cli(command: Command) -> Cli {
        Cli {
            config: None,
            verbose: false,
            compact: false,
            command,
        }
    }

    #[test]
    fn test_refuses_to_overwrite_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("session.eaf");
        fs::write(&input, IMPORTED_EAF).unwrap();

        let err = run(&cli(Command::Flexibilize {
            input: input.clone(),
            output: input.clone(),
        }))
        .unwrap_err();
        assert!(err.to_string().contains("不能覆盖输入文件"));
        assert_eq!(fs::read_to_string(&input).unwrap(), IMPORTED_EAF);
    }

    #[test]
    fn test_flexibilize_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("session.eaf");
        let flexible = dir.path().join("session_flexible.eaf");
        let toolbox = dir.path().join("session.txt");
        let timed = dir.path().join("session_timed.eaf");
        fs::write(&input, IMPORTED_EAF).unwrap();
        fs::write(&toolbox, TOOLBOX).unwrap();

        run(&cli(Command::Flexibilize {
            input,
            output: flexible.clone(),
        }))
        .unwrap();

        run(&cli(Command::ImportWordTimes(ImportArgs {
            input: flexible,
            toolbox,
            output: timed.clone(),
            reference_tier: None,
            text_tier: None,
            word_start_tier: None,
            word_end_tier: None,
        })))
        .unwrap();

        let document = parse_eaf(&fs::read_to_string(&timed).unwrap()).unwrap();
        assert_eq!(document.time_order().len(), 16);
        assert_eq!(
            document.annotation_end_time(elan_core::AnnotationId(4)),
            Some(5200)
        );
    }

    #[test]
    fn test_failed_import_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("session.eaf");
        let toolbox = dir.path().join("session.txt");
        let output = dir.path().join("out.eaf");
        fs::write(&input, IMPORTED_EAF).unwrap();
        fs::write(&toolbox, TOOLBOX).unwrap();

        // 未拆分的文档中，中间的词没有时间值
        let result = run(&cli(Command::ImportWordTimes(ImportArgs {
            input,
            toolbox,
            output: output.clone(),
            reference_tier: None,
            text_tier: None,
            word_start_tier: None,
            word_end_tier: None,
        })));
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
