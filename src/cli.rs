//! 命令行参数。

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use elan_core::ImportOptions;

/// 修复从 Toolbox 导入的 ELAN 文件的时间结构。
#[derive(Parser, Debug)]
#[command(name = "toolbox_elan", version, about)]
pub struct Cli {
    /// TOML 配置文件
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 输出不带缩进的 XML
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 拆分共享的时间槽，使导入后的词可以单独对齐
    Flexibilize {
        /// 输入的 ELAN 文件（由导入 Toolbox 文件生成）
        input: PathBuf,
        /// 输出的 ELAN 文件
        output: PathBuf,
    },
    /// 用 Toolbox 文件中的词级时间设置 ELAN 文件中词的起止时间
    ImportWordTimes(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// 输入的 ELAN 文件
    pub input: PathBuf,
    /// 含有词级时间的 Toolbox 文件
    pub toolbox: PathBuf,
    /// 输出的 ELAN 文件
    pub output: PathBuf,

    /// 参考层名（默认 ref）
    #[arg(long = "reftier", value_name = "MARKER")]
    pub reference_tier: Option<String>,

    /// 词所在的文本层名（默认 t）
    #[arg(long = "texttier", value_name = "MARKER")]
    pub text_tier: Option<String>,

    /// 词起始时间层名（默认 WordBegin）
    #[arg(long = "wordstarttier", value_name = "MARKER")]
    pub word_start_tier: Option<String>,

    /// 词结束时间层名（默认 WordEnd）
    #[arg(long = "wordendtier", value_name = "MARKER")]
    pub word_end_tier: Option<String>,
}

impl ImportArgs {
    /// 用命令行中给出的层名覆盖配置。
    pub fn apply_overrides(&self, options: &mut ImportOptions) {
        let overrides = [
            (&self.reference_tier, &mut options.reference_tier),
            (&self.text_tier, &mut options.text_tier),
            (&self.word_start_tier, &mut options.word_start_tier),
            (&self.word_end_tier, &mut options.word_end_tier),
        ];
        for (value, target) in overrides {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_import_overrides() {
        let cli = Cli::parse_from([
            "toolbox_elan",
            "import-word-times",
            "in.eaf",
            "words.txt",
            "out.eaf",
            "--reftier",
            "id",
            "--wordendtier",
            "WE",
        ]);
        let Command::ImportWordTimes(args) = cli.command else {
            panic!("应当解析为 import-word-times");
        };

        let mut options = ImportOptions::default();
        args.apply_overrides(&mut options);
        assert_eq!(options.reference_tier, "id");
        assert_eq!(options.text_tier, "t");
        assert_eq!(options.word_start_tier, "WordBegin");
        assert_eq!(options.word_end_tier, "WE");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["toolbox_elan", "flexibilize", "a.eaf", "b.eaf", "--compact", "-v"]);
        assert!(cli.compact);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Flexibilize { .. }));
    }
}
