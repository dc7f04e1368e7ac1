//! 行のトークン化
//!
//! 入力行を先頭から走査し、インライン指定と辞書マッチを組み合わせて
//! トークン列を組み立てます。一回の走査で各位置に以下の規則を順に
//! 適用します：
//!
//! 1. `$$` `((` `))` `[[` `]]` は一文字ぶん読み飛ばし、残りを通常の
//!    文字として扱う（重ね書きによるエスケープ）。
//! 2. `(見出し;読み;分割0;分割1)` は一時的な固有名詞として展開する。
//! 3. `[数字]` は直後の辞書マッチの優先度を指定する。
//! 4. `$...$` で囲まれた区間は一文字ずつ素通しする。
//! 5. 辞書の行頭マッチを試み、なければ一文字を素のトークンにする。
//!
//! どの規則にも失敗した入力は素のトークンになるため、トークン化自体は
//! 入力をえり好みしません。

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::Result;
use crate::markup;
use crate::term::{Decomposition, Term, TermKind};
use crate::token::{DualRubyToken, RubyToken, SpanToken};
use crate::TermDictionary;

/// インラインの語彙指定 `(見出し;読み;分割0;分割1)`
static QUAD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(([^;)]+?);([^;)]+?);([^;)]+?);([^;)]+?)\)(.*)").unwrap());

/// インラインの優先度指定 `[数字]`
static PRIORITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d+)\](.*)").unwrap());

/// 重ね書きでエスケープできる並び
const DOUBLED: [&str; 5] = ["$$", "((", "))", "[[", "]]"];

/// 走査の中間結果
enum Piece {
    /// 辞書にない一文字
    Plain(char),

    /// `$...$`で素通しされた一文字
    Pass(char),

    /// 辞書またはインライン指定から分解された区間列
    Slots(Decomposition),
}

/// 行のトークナイザ
///
/// 辞書への参照を保持し、行単位でトークン化を行います。
///
/// # 例
///
/// ```
/// # fn main() -> yomigana::errors::Result<()> {
/// use yomigana::{LineTokenizer, TermDictionary};
///
/// let csv = "\
/// Japanese,Kana,Division0,Division1,Type,Priority
/// 東京,とうきょう,1,1,名詞,0
/// ";
/// let dict = TermDictionary::from_reader(csv.as_bytes())?;
/// let tokenizer = LineTokenizer::new(&dict);
/// let tokens = tokenizer.tokenize_ruby("東京へ")?;
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].reading.as_deref(), Some("とうきょう"));
/// # Ok(())
/// # }
/// ```
pub struct LineTokenizer<'d> {
    dict: &'d TermDictionary,
}

impl<'d> LineTokenizer<'d> {
    /// 辞書を参照するトークナイザを生成します。
    pub const fn new(dict: &'d TermDictionary) -> Self {
        Self { dict }
    }

    /// 行をルビ形式のトークン列にします。
    pub fn tokenize_ruby(&self, line: &str) -> Result<Vec<RubyToken>> {
        let mut tokens = vec![];
        for piece in self.scan(line, 0)? {
            match piece {
                Piece::Plain(c) | Piece::Pass(c) => tokens.push(RubyToken {
                    surface: c.to_string(),
                    reading: None,
                    alignment: 0,
                }),
                Piece::Slots(decomposition) => {
                    tokens.extend(decomposition.into_ruby_tokens()?);
                }
            }
        }
        Ok(tokens)
    }

    /// 行を二段ルビ形式のトークン列にします。
    pub fn tokenize_dual(&self, line: &str) -> Result<Vec<DualRubyToken>> {
        let mut tokens = vec![];
        for piece in self.scan(line, 1)? {
            match piece {
                Piece::Plain(c) | Piece::Pass(c) => tokens.push(DualRubyToken {
                    surface: c.to_string(),
                    upper: None,
                    lower: None,
                }),
                Piece::Slots(decomposition) => {
                    tokens.extend(decomposition.into_dual_tokens()?);
                }
            }
        }
        Ok(tokens)
    }

    /// 行を区間形式のトークン列にします。
    ///
    /// `$...$`で素通しされた文字は読み飛ばし指定つきのトークンに
    /// なります。
    pub fn tokenize_span(&self, line: &str) -> Result<Vec<SpanToken>> {
        let mut tokens = vec![];
        for piece in self.scan(line, 2)? {
            match piece {
                Piece::Plain(c) => tokens.push(SpanToken {
                    surface: c.to_string(),
                    reading: None,
                    skip: false,
                }),
                Piece::Pass(c) => tokens.push(SpanToken {
                    surface: c.to_string(),
                    reading: None,
                    skip: true,
                }),
                Piece::Slots(decomposition) => {
                    tokens.extend(decomposition.into_span_tokens()?);
                }
            }
        }
        Ok(tokens)
    }

    /// 行を先頭から走査し、中間結果の列を返します。
    fn scan(&self, line: &str, scheme: usize) -> Result<Vec<Piece>> {
        let mut pieces = vec![];
        let mut rest = line;
        while !rest.is_empty() {
            let mut priority = 0;
            if DOUBLED.iter().any(|doubled| rest.starts_with(doubled)) {
                rest = advance_one(rest);
            } else if let Some(caps) = QUAD_PATTERN.captures(rest) {
                if let (Some(jp), Some(kana), Some(div0), Some(div1), Some(after)) = (
                    caps.get(1),
                    caps.get(2),
                    caps.get(3),
                    caps.get(4),
                    caps.get(5),
                ) {
                    rest = after.as_str();
                    // 中身が語として成立しない指定は、指定ごと通常の
                    // 文字列として扱い直す。
                    if let Ok(term) = Term::new(
                        jp.as_str(),
                        kana.as_str(),
                        div0.as_str(),
                        div1.as_str(),
                        TermKind::Proper,
                        0,
                    ) {
                        if let Ok(decomposition) =
                            term.decompose(&markup::plain(term.spelling()), scheme)
                        {
                            pieces.push(Piece::Slots(decomposition));
                            continue;
                        }
                    }
                }
            } else if let Some(caps) = PRIORITY_PATTERN.captures(rest) {
                if let (Some(num), Some(after)) = (caps.get(1), caps.get(2)) {
                    if let Ok(p) = num.as_str().parse() {
                        priority = p;
                        rest = after.as_str();
                    }
                }
            } else if rest.starts_with('$') {
                rest = advance_one(rest);
                while let Some(c) = rest.chars().next() {
                    rest = advance_one(rest);
                    if c == '$' {
                        break;
                    }
                    pieces.push(Piece::Pass(c));
                }
                continue;
            }
            match self.dict.longest_match(rest, priority)? {
                Some((term, surface, remaining)) => {
                    pieces.push(Piece::Slots(term.decompose(surface, scheme)?));
                    rest = remaining;
                }
                None => {
                    if let Some(c) = rest.chars().next() {
                        pieces.push(Piece::Plain(c));
                        rest = advance_one(rest);
                    }
                }
            }
        }
        Ok(pieces)
    }
}

/// 先頭の一文字を読み飛ばします。
fn advance_one(s: &str) -> &str {
    match s.chars().next() {
        Some(c) => &s[c.len_utf8()..],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Japanese,Kana,Division0,Division1,Type,Priority
東京,とうきょう,1,1,名詞,0
読*む,よ*む,0*-1,0*-1,五段,0
都,みやこ,0,0,名詞,1
";

    fn dict() -> TermDictionary {
        TermDictionary::from_reader(CSV.as_bytes()).unwrap()
    }

    fn ruby(token: &RubyToken) -> (&str, Option<&str>) {
        (token.surface.as_str(), token.reading.as_deref())
    }

    #[test]
    fn test_plain_scan() {
        let dict = dict();
        let tokenizer = LineTokenizer::new(&dict);
        let tokens = tokenizer.tokenize_ruby("東京で読みます").unwrap();
        let expected = [
            ("東京", Some("とうきょう")),
            ("で", None),
            ("読", Some("よ")),
            ("み", None),
            ("ま", None),
            ("す", None),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, expected) in tokens.iter().zip(expected) {
            assert_eq!(ruby(token), expected);
        }
    }

    #[test]
    fn test_surfaces_concatenate_to_input() {
        let dict = dict();
        let tokenizer = LineTokenizer::new(&dict);
        let line = "明日、東京で読む。";
        let surfaces: String = tokenizer
            .tokenize_ruby(line)
            .unwrap()
            .iter()
            .map(|t| t.surface.as_str())
            .collect();
        assert_eq!(surfaces, line);
    }

    #[test]
    fn test_inline_term() {
        let dict = TermDictionary::new();
        let tokenizer = LineTokenizer::new(&dict);
        let tokens = tokenizer.tokenize_ruby("(羽生;はにゅう;0;0)選手").unwrap();
        assert_eq!(ruby(&tokens[0]), ("羽生", Some("はにゅう")));
        assert_eq!(ruby(&tokens[1]), ("選", None));
        assert_eq!(ruby(&tokens[2]), ("手", None));
    }

    #[test]
    fn test_inline_term_matches_transient_proper_term() {
        let dict = TermDictionary::new();
        let tokenizer = LineTokenizer::new(&dict);
        let tokens = tokenizer.tokenize_ruby("(ABC;えいびーしー;0;-1)").unwrap();
        let term = Term::new("ABC", "えいびーしー", "0", "-1", TermKind::Proper, 0).unwrap();
        let expected = term
            .decompose("ABC", 0)
            .unwrap()
            .into_ruby_tokens()
            .unwrap();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_invalid_inline_term_is_dropped() {
        let dict = TermDictionary::new();
        let tokenizer = LineTokenizer::new(&dict);
        // 分割指定の数字が範囲外なので語として成立せず、指定ごと捨てられる。
        let tokens = tokenizer.tokenize_ruby("(羽生;はにゅう;9;9)です").unwrap();
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["で", "す"]);
    }

    #[test]
    fn test_priority_annotation() {
        let dict = dict();
        let tokenizer = LineTokenizer::new(&dict);
        // 優先度0では「都」はマッチしない。
        let tokens = tokenizer.tokenize_ruby("都").unwrap();
        assert_eq!(ruby(&tokens[0]), ("都", None));
        let tokens = tokenizer.tokenize_ruby("[1]都").unwrap();
        assert_eq!(ruby(&tokens[0]), ("都", Some("みやこ")));
    }

    #[test]
    fn test_dollar_span_is_passed_through() {
        let dict = dict();
        let tokenizer = LineTokenizer::new(&dict);
        let tokens = tokenizer.tokenize_span("$歌$：東京").unwrap();
        assert_eq!(tokens[0].surface, "歌");
        assert!(tokens[0].skip);
        assert_eq!(tokens[1].surface, "：");
        assert!(!tokens[1].skip);
        assert_eq!(tokens[2].surface, "東京");
        assert!(!tokens[2].skip);
    }

    #[test]
    fn test_unterminated_dollar_span() {
        let dict = dict();
        let tokenizer = LineTokenizer::new(&dict);
        let tokens = tokenizer.tokenize_span("$東京").unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.skip));
    }

    #[test]
    fn test_doubled_characters_collapse() {
        let dict = dict();
        let tokenizer = LineTokenizer::new(&dict);
        let tokens = tokenizer.tokenize_ruby("((重要))").unwrap();
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["(", "重", "要", ")"]);

        let tokens = tokenizer.tokenize_ruby("$$100").unwrap();
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["$", "1", "0", "0"]);
    }

    #[test]
    fn test_trailing_priority_annotation() {
        let dict = dict();
        let tokenizer = LineTokenizer::new(&dict);
        assert!(tokenizer.tokenize_ruby("東京[1]").unwrap().len() == 1);
    }

    #[test]
    fn test_dual_output() {
        let csv = "\
Japanese,Kana,Division0,Division1,Type,Priority
言/\\葉,こと/\\ば,0/0,0\\0,名詞,0
";
        let dict = TermDictionary::from_reader(csv.as_bytes()).unwrap();
        let tokenizer = LineTokenizer::new(&dict);
        let tokens = tokenizer.tokenize_dual("言葉").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].surface, "言葉");
        assert_eq!(tokens[0].upper.as_deref(), Some("こと"));
        assert_eq!(tokens[0].lower.as_deref(), Some("ば"));
    }
}
