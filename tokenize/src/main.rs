//! 振り仮名つきトークン化を実行するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだ行を辞書に基づいてトークン化し、
//! 指定された出力形式（ruby、dual、span）で結果を出力します。

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use yomigana::{LineTokenizer, TermDictionary};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Ruby,
    Dual,
    Span,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    /// 文字列から出力モードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列（"ruby"、"dual"、"span"のいずれか）
    ///
    /// # 戻り値
    ///
    /// パースに成功した場合は対応する `OutputMode`、失敗した場合はエラーメッセージ
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "ruby" => Ok(Self::Ruby),
            "dual" => Ok(Self::Dual),
            "span" => Ok(Self::Span),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Annotates lines with furigana")]
struct Args {
    /// Term dictionary (in CSV).
    #[clap(short = 'i', long)]
    dict: PathBuf,

    /// Output mode. Choices are ruby, dual, and span.
    #[clap(short = 'O', long, default_value = "ruby")]
    output_mode: OutputMode,
}

/// メイン関数
///
/// 辞書をロードし、標準入力から読み込んだ行をトークン化して、
/// 指定された形式で結果を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let dict = TermDictionary::from_reader(BufReader::new(File::open(&args.dict)?))?;
    let tokenizer = LineTokenizer::new(&dict);

    eprintln!("Ready to tokenize");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        match args.output_mode {
            OutputMode::Ruby => {
                for token in tokenizer.tokenize_ruby(&line)? {
                    writeln!(
                        &mut out,
                        "{}\t{}\t{}",
                        token.surface,
                        token.reading.as_deref().unwrap_or("*"),
                        token.alignment,
                    )?;
                }
            }
            OutputMode::Dual => {
                for token in tokenizer.tokenize_dual(&line)? {
                    writeln!(
                        &mut out,
                        "{}\t{}\t{}",
                        token.surface,
                        token.upper.as_deref().unwrap_or("*"),
                        token.lower.as_deref().unwrap_or("*"),
                    )?;
                }
            }
            OutputMode::Span => {
                for token in tokenizer.tokenize_span(&line)? {
                    writeln!(
                        &mut out,
                        "{}\t{}\t{}",
                        token.surface,
                        token.reading.as_deref().unwrap_or("*"),
                        if token.skip { "skip" } else { "-" },
                    )?;
                }
            }
        }
        out.write_all(b"EOS\n")?;
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
