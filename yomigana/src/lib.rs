//! # Yomigana
//!
//! Yomiganaは、辞書に基づいて日本語の行を振り仮名つきのトークン列に
//! 分割するライブラリです。
//!
//! ## 概要
//!
//! 語彙辞書には、見出し・読み・読みの割付指定・品詞・優先度を持つ語を
//! 登録します。行のトークン化は辞書の最長一致で進み、活用する品詞では
//! 語尾の活用形も認識されます。辞書にない部分は一文字ずつ素のトークンに
//! なるため、どんな入力でもトークン化は失敗しません。
//!
//! ## 主な機能
//!
//! - **辞書管理**: CSVとの相互変換、追加・削除・部分一致検索
//! - **行のトークン化**: 最長一致とインライン指定（一時語・優先度・
//!   素通し区間）による一括走査
//! - **三種類の出力形**: ルビ形式、二段ルビ形式、区間形式
//! - **分割指定の自動推定**: 見出しと読みから整合する分割候補を列挙
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use yomigana::{LineTokenizer, TermDictionary};
//!
//! let csv = "\
//! Japanese,Kana,Division0,Division1,Type,Priority
//! 東京,とうきょう,1,1,名詞,0
//! 読*む,よ*む,0*-1,0*-1,五段,0";
//!
//! let dict = TermDictionary::from_reader(csv.as_bytes())?;
//! let tokenizer = LineTokenizer::new(&dict);
//!
//! let tokens = tokenizer.tokenize_ruby("東京で読みます")?;
//! assert_eq!(tokens.len(), 6);
//!
//! assert_eq!(tokens[0].surface, "東京");
//! assert_eq!(tokens[0].reading.as_deref(), Some("とうきょう"));
//! assert_eq!(tokens[0].alignment, 1);
//!
//! assert_eq!(tokens[1].surface, "で");
//! assert_eq!(tokens[1].reading, None);
//!
//! assert_eq!(tokens[2].surface, "読");
//! assert_eq!(tokens[2].reading.as_deref(), Some("よ"));
//! # Ok(())
//! # }
//! ```

/// 分割指定の自動推定
pub mod auto_divide;

/// 文字種の判定
mod charset;

/// 語彙辞書
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// 区切り記法の処理
pub mod markup;

/// 活用形テンプレートの生成
mod pattern;

/// 語彙エントリ
pub mod term;

/// トークン型の定義
pub mod token;

/// 行のトークン化
pub mod tokenizer;

/// CSV処理のユーティリティ
pub mod utils;

#[cfg(test)]
mod tests;

// Re-exports
pub use auto_divide::{auto_divide, DivisionCandidate};
pub use dictionary::TermDictionary;
pub use errors::{Result, YomiganaError};
pub use term::{Term, TermKind};
pub use token::{DualRubyToken, RubyToken, SpanToken};
pub use tokenizer::LineTokenizer;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
