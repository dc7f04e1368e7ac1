//! 区切り記法のエンコード・デコード
//!
//! 辞書の見出し・読み・分割指定の各フィールドは、共通の区切り記法を持ちます：
//!
//! - `*` は語幹（活用しない部分）と語尾（活用語尾）を区切ります。
//! - `/` は割付方式0の区切り、`\` は割付方式1の区切りです。
//! - `$` は直後の区切り文字をエスケープし、文字そのものとして扱わせます。
//!
//! 検証・テンプレート生成・分解のすべてがこのモジュールを通して
//! 記法を解釈します。

use crate::errors::{Result, YomiganaError};

/// 割付方式0の区切り文字
pub const SCHEME0: char = '/';

/// 割付方式1の区切り文字
pub const SCHEME1: char = '\\';

/// 語幹と語尾の区切り文字
pub const GOBI: char = '*';

/// エスケープ文字
pub const ESCAPE: char = '$';

/// エスケープが正しく閉じているかどうかを判定します。
///
/// `$` の直後は `/` `\` `*` `$` のいずれかでなければなりません。
/// 末尾の孤立した `$` も不正です。
pub fn has_valid_escapes(s: &str) -> bool {
    let mut iter = s.chars();
    while let Some(c) = iter.next() {
        if c == ESCAPE {
            match iter.next() {
                Some('/' | '\\' | '*' | '$') => {}
                _ => return false,
            }
        }
    }
    true
}

/// エスケープされていない `marker` のバイト位置をすべて返します。
fn unescaped_positions(s: &str, marker: char) -> Vec<usize> {
    let mut positions = vec![];
    let mut iter = s.char_indices();
    while let Some((i, c)) = iter.next() {
        if c == ESCAPE {
            // Skips the escaped character.
            iter.next();
        } else if c == marker {
            positions.push(i);
        }
    }
    positions
}

/// エスケープされていない `marker` をすべて取り除きます。
///
/// エスケープ列 `$x` はそのまま保持されます。
///
/// # 引数
///
/// * `s` - 対象文字列
/// * `marker` - 取り除く区切り文字
pub fn remove_marker(s: &str, marker: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut iter = s.chars();
    while let Some(c) = iter.next() {
        if c == ESCAPE {
            out.push(c);
            if let Some(next) = iter.next() {
                out.push(next);
            }
        } else if c != marker {
            out.push(c);
        }
    }
    out
}

/// エスケープされていない `marker` で文字列を分割します。
///
/// 区切り文字が存在しない場合は全体を単一要素として返します。
///
/// # 引数
///
/// * `s` - 対象文字列
/// * `marker` - 区切り文字
pub fn split_marker<'a>(s: &'a str, marker: char) -> Vec<&'a str> {
    let mut parts = vec![];
    let mut start = 0;
    for pos in unescaped_positions(s, marker) {
        parts.push(&s[start..pos]);
        start = pos + marker.len_utf8();
    }
    parts.push(&s[start..]);
    parts
}

/// すべての区切り文字を取り除き、エスケープを解決した素の文字列を返します。
///
/// テンプレート生成やトークンの表層形の構築に使用されます。
///
/// # 例
///
/// ```
/// # use yomigana::markup::plain;
/// assert_eq!(plain("食/\\べ*る"), "食べる");
/// assert_eq!(plain("DECO$*27"), "DECO*27");
/// ```
pub fn plain(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut iter = s.chars();
    while let Some(c) = iter.next() {
        match c {
            ESCAPE => match iter.next() {
                Some(next @ ('/' | '\\' | '*' | '$')) => out.push(next),
                Some(next) => {
                    out.push(c);
                    out.push(next);
                }
                None => out.push(c),
            },
            SCHEME0 | SCHEME1 | GOBI => {}
            _ => out.push(c),
        }
    }
    out
}

/// 文字列を語幹と語尾に分割します。
///
/// エスケープされていない `*` が語幹と語尾の境界です。
/// 先頭の `*` は境界とみなしません（語幹は空にできません）。
///
/// # 戻り値
///
/// `(語幹, 語尾)` のペア。語尾が存在しない場合は `None` を返します。
///
/// # エラー
///
/// `*` が複数箇所に現れる場合、語幹・語尾の分割が一意に定まらないため
/// [`YomiganaError::MalformedDivision`]を返します。
pub fn split_gobi(s: &str) -> Result<(&str, Option<&str>)> {
    let positions = unescaped_positions(s, GOBI);
    match positions.as_slice() {
        [] => Ok((s, None)),
        [0] => Ok((s, None)),
        [pos] => Ok((&s[..*pos], Some(&s[pos + GOBI.len_utf8()..]))),
        _ => Err(YomiganaError::malformed_division(
            s,
            "more than one stem/ending split",
        )),
    }
}

/// 語尾を取り除いた語幹を返します。
#[inline(always)]
pub fn stem(s: &str) -> Result<&str> {
    Ok(split_gobi(s)?.0)
}

/// 語尾が存在するかどうかを判定します。
///
/// 語幹・語尾がともに空でない場合のみ語尾が存在するとみなします。
#[inline(always)]
pub fn has_gobi(s: &str) -> Result<bool> {
    Ok(matches!(split_gobi(s)?, (_, Some(ending)) if !ending.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_escapes() {
        assert!(has_valid_escapes("食/\\べ*る"));
        assert!(has_valid_escapes("DECO$*27"));
        assert!(has_valid_escapes("$$"));
        assert!(!has_valid_escapes("$"));
        assert!(!has_valid_escapes("東$京"));
        assert!(!has_valid_escapes("$$$"));
    }

    #[test]
    fn test_remove_marker() {
        assert_eq!(remove_marker("食/\\べ*る", SCHEME1), "食/べ*る");
        assert_eq!(remove_marker("食/\\べ*る", SCHEME0), "食\\べ*る");
        assert_eq!(remove_marker("a$/b/c", SCHEME0), "a$/bc");
    }

    #[test]
    fn test_split_marker() {
        assert_eq!(split_marker("食/べ", SCHEME0), vec!["食", "べ"]);
        assert_eq!(split_marker("東京", SCHEME0), vec!["東京"]);
        assert_eq!(split_marker("a$/b/c", SCHEME0), vec!["a$/b", "c"]);
        assert_eq!(split_marker("0\\-1", SCHEME1), vec!["0", "-1"]);
    }

    #[test]
    fn test_plain_round_trip() {
        assert_eq!(plain("食/\\べ*る"), "食べる");
        assert_eq!(plain("0/0*-1"), "00-1");
        assert_eq!(plain("$/$\\$*$$"), "/\\*$");
        assert_eq!(plain("東京"), "東京");
    }

    #[test]
    fn test_split_gobi() {
        assert_eq!(split_gobi("読*む").unwrap(), ("読", Some("む")));
        assert_eq!(split_gobi("東京").unwrap(), ("東京", None));
        assert_eq!(split_gobi("*む").unwrap(), ("*む", None));
        assert_eq!(split_gobi("読*").unwrap(), ("読", Some("")));
        assert_eq!(split_gobi("DECO$*27").unwrap(), ("DECO$*27", None));
        assert!(split_gobi("a*b*c").is_err());
    }

    #[test]
    fn test_has_gobi() {
        assert!(has_gobi("読*む").unwrap());
        assert!(!has_gobi("読*").unwrap());
        assert!(!has_gobi("東京").unwrap());
        assert!(!has_gobi("$*").unwrap());
    }
}
