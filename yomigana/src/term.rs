//! 語彙エントリ
//!
//! 辞書に登録される一語を[`Term`]として表現します。構築時にすべての
//! フィールドの整合性が検証されるため、辞書内の語は常に正しい記法を
//! 持つことが保証されます。

use regex::Regex;

use crate::charset;
use crate::errors::{Result, YomiganaError};
use crate::markup;
use crate::pattern;
use crate::token::{DualRubyToken, RubyToken, SpanToken};

/// 品詞の種別
///
/// 活用のしかたに応じて語を八種類に分類します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// 名詞（活用しない）
    Noun,

    /// 五段活用動詞
    Godan,

    /// 上一段・下一段活用動詞
    Ichidan,

    /// サ行変格活用動詞
    Sahen,

    /// カ行変格活用動詞（「来る」のみ）
    Kahen,

    /// 形容詞
    Adjective,

    /// 英単語
    English,

    /// 固有名詞（任意の文字を許可）
    Proper,
}

impl TermKind {
    /// CSVで使用されるラベルを返します。
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Noun => "名詞",
            Self::Godan => "五段",
            Self::Ichidan => "上下",
            Self::Sahen => "サ変",
            Self::Kahen => "カ変",
            Self::Adjective => "形容",
            Self::English => "英語",
            Self::Proper => "固有",
        }
    }

    /// CSVのラベルから品詞を復元します。
    pub fn from_label(label: &str) -> Option<Self> {
        Some(match label {
            "名詞" => Self::Noun,
            "五段" => Self::Godan,
            "上下" => Self::Ichidan,
            "サ変" => Self::Sahen,
            "カ変" => Self::Kahen,
            "形容" => Self::Adjective,
            "英語" => Self::English,
            "固有" => Self::Proper,
            _ => return None,
        })
    }
}

impl std::fmt::Display for TermKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// 辞書の一エントリ
///
/// 見出し・読み・二種類の分割指定・品詞・優先度を持ちます。
/// 見出しと読みには区切り記法（[`markup`]参照）が埋め込まれます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    spelling: String,
    reading: String,
    division0: String,
    division1: String,
    kind: TermKind,
    priority: u32,
}

impl Term {
    /// 新しい語彙エントリを生成します。
    ///
    /// # 引数
    ///
    /// * `spelling` - 見出し（区切り記法つき）
    /// * `reading` - 読み（区切り記法つき）
    /// * `division0` - 割付方式0の分割指定
    /// * `division1` - 割付方式1の分割指定
    /// * `kind` - 品詞
    /// * `priority` - 優先度
    ///
    /// # エラー
    ///
    /// フィールドの整合性検証に失敗した場合、
    /// [`YomiganaError::InvalidTerm`]を返します。
    pub fn new<S>(
        spelling: S,
        reading: S,
        division0: S,
        division1: S,
        kind: TermKind,
        priority: u32,
    ) -> Result<Self>
    where
        S: Into<String>,
    {
        let term = Self {
            spelling: spelling.into(),
            reading: reading.into(),
            division0: division0.into(),
            division1: division1.into(),
            kind,
            priority,
        };
        term.validate(0)?;
        term.validate(1)?;
        Ok(term)
    }

    /// 見出しを返します。
    #[inline(always)]
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// 読みを返します。
    #[inline(always)]
    pub fn reading(&self) -> &str {
        &self.reading
    }

    /// 割付方式0の分割指定を返します。
    #[inline(always)]
    pub fn division0(&self) -> &str {
        &self.division0
    }

    /// 割付方式1の分割指定を返します。
    #[inline(always)]
    pub fn division1(&self) -> &str {
        &self.division1
    }

    /// 品詞を返します。
    #[inline(always)]
    pub fn kind(&self) -> TermKind {
        self.kind
    }

    /// 優先度を返します。
    #[inline(always)]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// 行中の出現形にマッチする正規表現を生成します。
    ///
    /// グループ1が出現形、グループ2が行の残りを捕捉します。
    pub fn surface_pattern(&self) -> Result<Regex> {
        Ok(Regex::new(&pattern::surface_template(self)?)?)
    }

    /// 割付方式`scheme`での整合性を検証します。
    fn validate(&self, scheme: usize) -> Result<()> {
        let fields = [
            ("Japanese", self.spelling.as_str()),
            ("Kana", self.reading.as_str()),
            ("Division0", self.division0.as_str()),
            ("Division1", self.division1.as_str()),
        ];
        for (field, value) in fields {
            if !markup::has_valid_escapes(value) {
                return Err(YomiganaError::invalid_term(
                    field,
                    format!("invalid escape sequence in {value:?}"),
                ));
            }
        }
        if !matches!(self.kind, TermKind::English | TermKind::Proper) {
            for (field, value) in [
                ("Japanese", self.spelling.as_str()),
                ("Kana", self.reading.as_str()),
            ] {
                let allowed = value
                    .chars()
                    .all(|c| charset::is_japanese(c) || matches!(c, '/' | '\\' | '*'));
                if !allowed {
                    return Err(YomiganaError::invalid_term(
                        field,
                        format!("unusable character in {value:?}"),
                    ));
                }
            }
        }

        let (keep, drop) = if scheme == 0 {
            (markup::SCHEME0, markup::SCHEME1)
        } else {
            (markup::SCHEME1, markup::SCHEME0)
        };
        let div_src = if scheme == 0 {
            &self.division0
        } else {
            &self.division1
        };
        let jp = markup::remove_marker(&self.spelling, drop);
        let kana = markup::remove_marker(&self.reading, drop);
        let division = markup::remove_marker(div_src, drop);

        let gobi_of = |field: &'static str, s: &str| -> Result<bool> {
            markup::has_gobi(s)
                .map_err(|_| YomiganaError::invalid_term(field, "more than one stem/ending split"))
        };
        let jp_has_gobi = gobi_of("Japanese", &jp)?;
        let kana_has_gobi = gobi_of("Kana", &kana)?;
        let div_has_gobi = gobi_of(if scheme == 0 { "Division0" } else { "Division1" }, &division)?;

        let (jp_stem, kana_stem, div_stem) = match self.kind {
            TermKind::Noun | TermKind::Proper => {
                if jp_has_gobi || kana_has_gobi || div_has_gobi {
                    return Err(YomiganaError::invalid_term(
                        "Japanese",
                        "stem/ending split is not allowed for a non-conjugating term",
                    ));
                }
                (jp, kana, division)
            }
            TermKind::Kahen => {
                if jp != "来る" || kana != "くる" || division != "0" {
                    return Err(YomiganaError::invalid_term(
                        "Japanese",
                        "the only irregular ka-column verb is 来る/くる with division 0",
                    ));
                }
                return Ok(());
            }
            TermKind::English => {
                if jp_has_gobi || kana_has_gobi || div_has_gobi {
                    return Err(YomiganaError::invalid_term(
                        "Japanese",
                        "stem/ending split is not allowed for an English term",
                    ));
                }
                let division_ok =
                    (scheme == 0 && division == "1") || (scheme != 0 && division == "0");
                if !division_ok {
                    return Err(YomiganaError::invalid_term(
                        if scheme == 0 { "Division0" } else { "Division1" },
                        "an English term requires division 1 for scheme 0 and 0 for scheme 1",
                    ));
                }
                if !jp.chars().all(|c| c.is_alphabetic() || c == '\'') {
                    return Err(YomiganaError::invalid_term(
                        "Japanese",
                        format!("non-alphabetic character in {jp:?}"),
                    ));
                }
                return Ok(());
            }
            _ => {
                if !(jp_has_gobi && kana_has_gobi && div_has_gobi) {
                    return Err(YomiganaError::invalid_term(
                        "Japanese",
                        "a conjugating term requires a stem/ending split in every field",
                    ));
                }
                // The split cannot fail here, has_gobi already decoded it.
                let (jp_stem, jp_gobi) = markup::split_gobi(&jp)?;
                let (kana_stem, kana_gobi) = markup::split_gobi(&kana)?;
                let (div_stem, div_gobi) = markup::split_gobi(&division)?;
                if jp_gobi != kana_gobi || div_gobi != Some("-1") {
                    return Err(YomiganaError::invalid_term(
                        "Kana",
                        "endings of Japanese and Kana must match and the division ending must be -1",
                    ));
                }
                let ending_ok = match self.kind {
                    TermKind::Godan => {
                        jp_gobi.map_or(false, |e| {
                            let mut chars = e.chars();
                            matches!((chars.next(), chars.next()), (Some(c), None) if pattern::is_godan_ending(c))
                        })
                    }
                    TermKind::Ichidan => jp_gobi == Some("る"),
                    TermKind::Sahen => jp_gobi == Some("する"),
                    TermKind::Adjective => jp_gobi == Some("い"),
                    _ => false,
                };
                if !ending_ok {
                    return Err(YomiganaError::invalid_term(
                        "Japanese",
                        format!("invalid ending for term type {}", self.kind),
                    ));
                }
                (
                    jp_stem.to_string(),
                    kana_stem.to_string(),
                    div_stem.to_string(),
                )
            }
        };

        let jp_parts = markup::split_marker(&jp_stem, keep);
        let kana_parts = markup::split_marker(&kana_stem, keep);
        let div_parts = markup::split_marker(&div_stem, keep);
        if jp_parts.len() != kana_parts.len() || jp_parts.len() != div_parts.len() {
            return Err(YomiganaError::invalid_term(
                "Japanese",
                format!(
                    "Japanese, Kana and Division have different numbers of parts: {}, {}, {}",
                    jp_parts.len(),
                    kana_parts.len(),
                    div_parts.len()
                ),
            ));
        }
        for ((jp_part, kana_part), div_part) in jp_parts.iter().zip(&kana_parts).zip(&div_parts) {
            if self.kind == TermKind::Proper {
                if !matches!(*div_part, "-1" | "0" | "1" | "2") {
                    return Err(YomiganaError::invalid_term(
                        "Division0",
                        format!("invalid division digit {div_part:?}"),
                    ));
                }
                continue;
            }
            let all_kana = jp_part.chars().all(charset::is_kana);
            let no_kana = jp_part.chars().all(|c| !charset::is_kana(c));
            if all_kana {
                if no_kana {
                    // Both hold only for an empty part.
                    return Err(YomiganaError::invalid_term(
                        "Japanese",
                        "empty part between separators",
                    ));
                }
                if jp_part != kana_part || *div_part != "-1" {
                    return Err(YomiganaError::invalid_term(
                        "Kana",
                        "a kana part must equal its reading and carry division -1",
                    ));
                }
            } else if no_kana {
                if !matches!(*div_part, "0" | "1" | "2") {
                    return Err(YomiganaError::invalid_term(
                        "Division0",
                        format!("invalid division digit {div_part:?}"),
                    ));
                }
            } else {
                return Err(YomiganaError::invalid_term(
                    "Japanese",
                    "a part must not mix kana and non-kana characters",
                ));
            }
        }
        Ok(())
    }

    /// 行中の出現形を読みつきの区間列に分解します。
    ///
    /// # 引数
    ///
    /// * `surface` - [`Term::surface_pattern`]のグループ1に相当する出現形
    /// * `scheme` - 割付方式（0、1、2。2は方式1の分割指定を使用）
    ///
    /// # エラー
    ///
    /// `surface`がこの語の語幹と一致しない場合は
    /// [`YomiganaError::InvalidState`]を、保存済みの分割指定が復号できない
    /// 場合は[`YomiganaError::MalformedDivision`]を返します。
    pub fn decompose(&self, surface: &str, scheme: usize) -> Result<Decomposition> {
        if self.kind == TermKind::Kahen {
            return self.decompose_kahen(surface);
        }
        let (keep, drop) = if scheme == 0 {
            (markup::SCHEME0, markup::SCHEME1)
        } else {
            (markup::SCHEME1, markup::SCHEME0)
        };
        let div_src = if scheme == 0 {
            &self.division0
        } else {
            &self.division1
        };
        let jp = markup::remove_marker(&self.spelling, drop);
        let kana = markup::remove_marker(&self.reading, drop);
        let division = markup::remove_marker(div_src, drop);

        let jp_stem = markup::stem(&jp)?.to_string();
        let kana_stem = markup::stem(&kana)?.to_string();
        let div_stem = markup::stem(&division)?.to_string();

        let stem_plain = markup::plain(&jp_stem);
        let (head, tail) = split_at_char(surface, stem_plain.chars().count()).ok_or_else(|| {
            YomiganaError::invalid_state(
                format!("surface {surface:?} is shorter than the stem of {:?}", self.spelling),
                "the surface must come from this term's pattern",
            )
        })?;
        let head_matches = if self.kind == TermKind::English {
            head.to_lowercase() == stem_plain.to_lowercase()
        } else {
            head == stem_plain
        };
        if !head_matches {
            return Err(YomiganaError::invalid_state(
                format!("surface {surface:?} does not start with the stem of {:?}", self.spelling),
                "the surface must come from this term's pattern",
            ));
        }
        // A stored form may spell out the stem/ending boundary.
        let leftover = if self.kind != TermKind::English && self.kind != TermKind::Proper {
            tail.strip_prefix(markup::GOBI).unwrap_or(tail)
        } else {
            tail
        };

        let surfaces = if self.kind == TermKind::English {
            vec![head.to_string()]
        } else {
            markup::split_marker(&jp_stem, keep)
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        let readings = markup::split_marker(&kana_stem, keep)
            .into_iter()
            .map(str::to_string)
            .collect();
        let divisions = markup::split_marker(&div_stem, keep)
            .into_iter()
            .map(str::to_string)
            .collect();
        Ok(Decomposition {
            surfaces,
            readings,
            divisions,
            leftover: leftover.to_string(),
        })
    }

    /// カ変動詞の出現形を活用表から分解します。
    fn decompose_kahen(&self, surface: &str) -> Result<Decomposition> {
        for (form, reading) in pattern::KAHEN_SURFACES {
            if let Some(rest) = surface.strip_prefix(form) {
                let mut form_chars = form.chars();
                form_chars.next();
                let mut reading_chars = reading.chars();
                let first = reading_chars.next().map(String::from).unwrap_or_default();
                return Ok(Decomposition {
                    surfaces: vec!["来".to_string(), form_chars.as_str().to_string()],
                    readings: vec![first, reading_chars.as_str().to_string()],
                    divisions: vec!["0".to_string(), "-1".to_string()],
                    leftover: rest.to_string(),
                });
            }
        }
        Err(YomiganaError::invalid_state(
            format!("surface {surface:?} is not a form of 来る"),
            "the surface must come from this term's pattern",
        ))
    }
}

/// 出現形を区切りごとに分けた中間表現
///
/// 対応する位置の表層形・読み・割付指定を並行に保持します。
/// 三種類のトークン形のどれにでも変換できます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    /// 区間ごとの表層形（エスケープは未解決）
    pub(crate) surfaces: Vec<String>,

    /// 区間ごとの読み
    pub(crate) readings: Vec<String>,

    /// 区間ごとの割付指定
    pub(crate) divisions: Vec<String>,

    /// 語幹より後ろに続く表層形
    pub(crate) leftover: String,
}

impl Decomposition {
    /// ルビ形式のトークン列に変換します。
    ///
    /// 割付指定が-1の区間と残り部分は読みなしのトークンになります。
    pub fn into_ruby_tokens(self) -> Result<Vec<RubyToken>> {
        let mut tokens = Vec::with_capacity(self.surfaces.len() + 1);
        for ((surface, reading), division) in
            self.surfaces.iter().zip(&self.readings).zip(&self.divisions)
        {
            let digit = div_digit(division)?;
            if (0..=2).contains(&digit) {
                tokens.push(RubyToken {
                    surface: markup::plain(surface),
                    reading: Some(markup::plain(reading)),
                    alignment: digit as u8,
                });
            } else {
                tokens.push(RubyToken {
                    surface: markup::plain(surface),
                    reading: None,
                    alignment: 0,
                });
            }
        }
        if !self.leftover.is_empty() {
            tokens.push(RubyToken {
                surface: markup::plain(&self.leftover),
                reading: None,
                alignment: 0,
            });
        }
        Ok(tokens)
    }

    /// 二段ルビ形式のトークン列に変換します。
    ///
    /// 均等割付（指定0）の区間が隣接する場合、二つをまとめて一つの
    /// 表層形とし、読みを上下の段に振り分けます。
    pub fn into_dual_tokens(self) -> Result<Vec<DualRubyToken>> {
        let n = self
            .surfaces
            .len()
            .min(self.readings.len())
            .min(self.divisions.len());
        let mut tokens = Vec::with_capacity(n + 1);
        let mut i = 0;
        while i < n {
            let digit = div_digit(&self.divisions[i])?;
            if digit == 0 {
                if i + 1 < n && div_digit(&self.divisions[i + 1])? == 0 {
                    tokens.push(DualRubyToken {
                        surface: format!(
                            "{}{}",
                            markup::plain(&self.surfaces[i]),
                            markup::plain(&self.surfaces[i + 1])
                        ),
                        upper: Some(markup::plain(&self.readings[i])),
                        lower: Some(markup::plain(&self.readings[i + 1])),
                    });
                    i += 2;
                } else {
                    tokens.push(DualRubyToken {
                        surface: markup::plain(&self.surfaces[i]),
                        upper: Some(markup::plain(&self.readings[i])),
                        lower: None,
                    });
                    i += 1;
                }
            } else {
                tokens.push(DualRubyToken {
                    surface: markup::plain(&self.surfaces[i]),
                    upper: None,
                    lower: None,
                });
                i += 1;
            }
        }
        if !self.leftover.is_empty() {
            tokens.push(DualRubyToken {
                surface: markup::plain(&self.leftover),
                upper: None,
                lower: None,
            });
        }
        Ok(tokens)
    }

    /// 区間形式のトークン列に変換します。
    ///
    /// 同じ割付指定を持つ連続した区間は一つのトークンにまとめられ、
    /// 読みは指定0の区間でのみ保持されます。
    pub fn into_span_tokens(self) -> Result<Vec<SpanToken>> {
        let mut tokens = vec![];
        let mut cur_surface = String::new();
        let mut cur_reading = String::new();
        let mut cur_digit = 0;
        for ((surface, reading), division) in
            self.surfaces.iter().zip(&self.readings).zip(&self.divisions)
        {
            let digit = div_digit(division)?;
            if digit != cur_digit {
                if !cur_surface.is_empty() {
                    tokens.push(span_token(&cur_surface, &cur_reading, cur_digit));
                }
                cur_surface = surface.clone();
                cur_reading = reading.clone();
                cur_digit = digit;
            } else {
                cur_surface.push_str(surface);
                cur_reading.push_str(reading);
            }
        }
        if !cur_surface.is_empty() {
            tokens.push(span_token(&cur_surface, &cur_reading, cur_digit));
        }
        if !self.leftover.is_empty() {
            tokens.push(SpanToken {
                surface: markup::plain(&self.leftover),
                reading: None,
                skip: false,
            });
        }
        Ok(tokens)
    }
}

fn span_token(surface: &str, reading: &str, digit: i32) -> SpanToken {
    SpanToken {
        surface: markup::plain(surface),
        reading: (digit == 0).then(|| markup::plain(reading)),
        skip: false,
    }
}

/// 割付指定の一区間を数値に復号します。
fn div_digit(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| YomiganaError::malformed_division(s, "not a division digit"))
}

/// 文字列を先頭から`n`文字の位置で分割します。
///
/// 文字数が`n`に満たない場合は`None`を返します。
fn split_at_char(s: &str, n: usize) -> Option<(&str, &str)> {
    let mut count = 0;
    for (i, _) in s.char_indices() {
        if count == n {
            return Some(s.split_at(i));
        }
        count += 1;
    }
    (count == n).then(|| (s, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noun() -> Term {
        Term::new("言/\\葉", "こと/\\ば", "0/0", "0\\0", TermKind::Noun, 0).unwrap()
    }

    #[test]
    fn test_labels_round_trip() {
        for kind in [
            TermKind::Noun,
            TermKind::Godan,
            TermKind::Ichidan,
            TermKind::Sahen,
            TermKind::Kahen,
            TermKind::Adjective,
            TermKind::English,
            TermKind::Proper,
        ] {
            assert_eq!(TermKind::from_label(kind.as_label()), Some(kind));
        }
        assert_eq!(TermKind::from_label("動詞"), None);
    }

    #[test]
    fn test_new_accepts_valid_terms() {
        assert!(Term::new("東京", "とうきょう", "1", "1", TermKind::Noun, 0).is_ok());
        assert!(Term::new("読*む", "よ*む", "0*-1", "0*-1", TermKind::Godan, 0).is_ok());
        assert!(Term::new("食/\\べ*る", "た/\\べ*る", "0/-1*-1", "0\\-1*-1", TermKind::Ichidan, 0).is_ok());
        assert!(Term::new("勉強*する", "べんきょう*する", "2*-1", "2*-1", TermKind::Sahen, 0).is_ok());
        assert!(Term::new("来る", "くる", "0", "0", TermKind::Kahen, 0).is_ok());
        assert!(Term::new("高*い", "たか*い", "0*-1", "0*-1", TermKind::Adjective, 0).is_ok());
        assert!(Term::new("ABC", "えいびーしー", "1", "0", TermKind::English, 0).is_ok());
        assert!(Term::new("DECO$*27", "でこにーな", "1", "0", TermKind::Proper, 0).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_terms() {
        // Dangling escape.
        assert!(Term::new("東京$", "とうきょう", "1", "1", TermKind::Noun, 0).is_err());
        // Non-Japanese character outside 英語/固有.
        assert!(Term::new("ABC", "えいびーしー", "1", "1", TermKind::Noun, 0).is_err());
        // Ending split on a noun.
        assert!(Term::new("東*京", "とう*きょう", "1*-1", "1*-1", TermKind::Noun, 0).is_err());
        // Missing ending split on a verb.
        assert!(Term::new("読む", "よむ", "0", "0", TermKind::Godan, 0).is_err());
        // Ending mismatch between spelling and reading.
        assert!(Term::new("読*む", "よ*み", "0*-1", "0*-1", TermKind::Godan, 0).is_err());
        // Wrong ending for the type.
        assert!(Term::new("読*む", "よ*む", "0*-1", "0*-1", TermKind::Ichidan, 0).is_err());
        // Wrong division for an English term.
        assert!(Term::new("ABC", "えいびーしー", "0", "1", TermKind::English, 0).is_err());
        // Kahen is fixed.
        assert!(Term::new("行く", "いく", "0", "0", TermKind::Kahen, 0).is_err());
        // Part counts differ.
        assert!(Term::new("言/\\葉", "こと/\\ば", "0", "0\\0", TermKind::Noun, 0).is_err());
        // Kana part whose reading does not echo it.
        assert!(Term::new("お/\\茶", "こ/\\ちゃ", "-1/0", "-1\\0", TermKind::Noun, 0).is_err());
        // Mixed kana and kanji in one part.
        assert!(Term::new("お茶", "おちゃ", "1", "1", TermKind::Noun, 0).is_err());
        // Invalid division digit.
        assert!(Term::new("言/\\葉", "こと/\\ば", "0/3", "0\\0", TermKind::Noun, 0).is_err());
    }

    #[test]
    fn test_decompose_noun() {
        let d = noun().decompose("言葉", 0).unwrap();
        assert_eq!(d.surfaces, vec!["言", "葉"]);
        assert_eq!(d.readings, vec!["こと", "ば"]);
        assert_eq!(d.divisions, vec!["0", "0"]);
        assert_eq!(d.leftover, "");
    }

    #[test]
    fn test_decompose_godan_keeps_conjugated_ending() {
        let term = Term::new("読*む", "よ*む", "0*-1", "0*-1", TermKind::Godan, 0).unwrap();
        let d = term.decompose("読み", 0).unwrap();
        assert_eq!(d.surfaces, vec!["読"]);
        assert_eq!(d.readings, vec!["よ"]);
        assert_eq!(d.divisions, vec!["0"]);
        assert_eq!(d.leftover, "み");
    }

    #[test]
    fn test_decompose_kahen() {
        let term = Term::new("来る", "くる", "0", "0", TermKind::Kahen, 0).unwrap();
        let d = term.decompose("来なければ", 0).unwrap();
        assert_eq!(d.surfaces, vec!["来", "なければ"]);
        assert_eq!(d.readings, vec!["こ", "なければ"]);
        assert_eq!(d.divisions, vec!["0", "-1"]);
        assert!(term.decompose("行く", 0).is_err());
    }

    #[test]
    fn test_decompose_english_preserves_case() {
        let term = Term::new("ABC", "えいびーしー", "1", "0", TermKind::English, 0).unwrap();
        let d = term.decompose("aBc", 0).unwrap();
        assert_eq!(d.surfaces, vec!["aBc"]);
        assert_eq!(d.readings, vec!["えいびーしー"]);
        assert_eq!(d.divisions, vec!["1"]);
    }

    #[test]
    fn test_decompose_rejects_foreign_surface() {
        assert!(noun().decompose("言", 0).is_err());
        assert!(noun().decompose("単語", 0).is_err());
    }

    #[test]
    fn test_ruby_tokens() {
        let tokens = noun().decompose("言葉", 0).unwrap().into_ruby_tokens().unwrap();
        assert_eq!(
            tokens,
            vec![
                RubyToken {
                    surface: "言".to_string(),
                    reading: Some("こと".to_string()),
                    alignment: 0,
                },
                RubyToken {
                    surface: "葉".to_string(),
                    reading: Some("ば".to_string()),
                    alignment: 0,
                },
            ]
        );
    }

    #[test]
    fn test_dual_tokens_merge_adjacent_even_spans() {
        let tokens = noun().decompose("言葉", 1).unwrap().into_dual_tokens().unwrap();
        assert_eq!(
            tokens,
            vec![DualRubyToken {
                surface: "言葉".to_string(),
                upper: Some("こと".to_string()),
                lower: Some("ば".to_string()),
            }]
        );
    }

    #[test]
    fn test_span_tokens_group_runs() {
        let term =
            Term::new("食/\\べ*る", "た/\\べ*る", "0/-1*-1", "0\\-1*-1", TermKind::Ichidan, 0)
                .unwrap();
        let tokens = term.decompose("食べ", 2).unwrap().into_span_tokens().unwrap();
        assert_eq!(
            tokens,
            vec![
                SpanToken {
                    surface: "食".to_string(),
                    reading: Some("た".to_string()),
                    skip: false,
                },
                SpanToken {
                    surface: "べ".to_string(),
                    reading: None,
                    skip: false,
                },
            ]
        );
    }
}
