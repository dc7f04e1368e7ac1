//! 活用形テンプレートの生成
//!
//! 語彙エントリから、行中の出現形にマッチする正規表現テンプレートを
//! 組み立てます。テンプレートは常に `^(出現形)(残り)$` の形をとり、
//! 活用する品詞では語尾部分が活用形の選択肢に展開されます。

use crate::errors::{Result, YomiganaError};
use crate::markup;
use crate::term::{Term, TermKind};

/// 五段活用の語尾ごとの活用形
///
/// 終止形の語尾に対して、行中に現れうる語尾の一覧を返します。
/// 音便形（っ・い・ん）も含みます。
pub fn godan_surfaces(gobi: char) -> Option<&'static [&'static str]> {
    Some(match gobi {
        'う' => &["わ", "い", "う", "え", "お", "っ"],
        'く' => &["か", "き", "く", "け", "こ", "い"],
        'ぐ' => &["が", "ぎ", "ぐ", "げ", "ご", "い"],
        'す' => &["さ", "し", "す", "せ", "そ"],
        'つ' => &["た", "ち", "つ", "て", "と", "っ"],
        'ぬ' => &["な", "に", "ぬ", "ね", "の", "ん"],
        'ぶ' => &["ば", "び", "ぶ", "べ", "ぼ", "ん"],
        'む' => &["ま", "み", "む", "め", "も", "ん"],
        'る' => &["ら", "り", "る", "れ", "ろ", "っ"],
        _ => return None,
    })
}

/// 形容詞の語幹に後続しうる語尾
pub const ADJECTIVE_SURFACES: &[&str] = &[
    "い", "く", "かっ", "ければ", "がる", "がり", "がら", "がれ", "がろ", "さ", "げ", "そう",
    "さそう", "すぎ", "過ぎ",
];

/// カ変動詞の活用形とその読みの対応表
///
/// カ変は「来る」一語のみのため、活用形を固定の表として持ちます。
/// どの形も他の形の接頭辞にならないため、前方一致の走査順は任意です。
pub const KAHEN_SURFACES: &[(&str, &str)] = &[
    ("来る", "くる"),
    ("来ない", "こない"),
    ("来なく", "こなく"),
    ("来なかっ", "こなかっ"),
    ("来なければ", "こなければ"),
    ("来なさ", "きなさい"),
    ("来た", "きた"),
    ("来て", "きて"),
    ("来られ", "こられ"),
    ("来い", "こい"),
    ("来よ", "こよ"),
];

/// 行中の出現形にマッチする正規表現文字列を生成します。
///
/// # 戻り値
///
/// `^(出現形)(残り)$` 形式の正規表現文字列。グループ1が出現形、
/// グループ2が行の残りを捕捉します。
///
/// # エラー
///
/// 語幹・語尾の分割指定が壊れている場合、
/// [`YomiganaError::MalformedDivision`]を返します。
pub fn surface_template(term: &Term) -> Result<String> {
    match term.kind() {
        TermKind::Noun => Ok(format!("^({})(.*)$", markup::plain(term.spelling()))),
        TermKind::Proper => Ok(format!(
            "^({})(.*)$",
            regex::escape(&markup::plain(term.spelling()))
        )),
        TermKind::Godan => {
            let (stem, ending) = markup::split_gobi(term.spelling())?;
            let gobi = ending.and_then(|e| e.chars().next()).ok_or_else(|| {
                YomiganaError::malformed_division(term.spelling(), "missing godan ending")
            })?;
            let surfaces = godan_surfaces(gobi).ok_or_else(|| {
                YomiganaError::malformed_division(term.spelling(), "unknown godan ending")
            })?;
            Ok(format!(
                "^({}(?:{}))(.*)$",
                markup::plain(stem),
                surfaces.join("|")
            ))
        }
        TermKind::Ichidan | TermKind::Sahen => {
            let stem = markup::stem(term.spelling())?;
            Ok(format!("^({})(.*)$", markup::plain(stem)))
        }
        TermKind::Kahen => {
            let forms: Vec<&str> = KAHEN_SURFACES.iter().map(|(form, _)| *form).collect();
            Ok(format!("^({})(.*)$", forms.join("|")))
        }
        TermKind::Adjective => {
            let stem = markup::stem(term.spelling())?;
            Ok(format!(
                "^({}(?:{}))(.*)$",
                markup::plain(stem),
                ADJECTIVE_SURFACES.join("|")
            ))
        }
        TermKind::English => {
            let mut class = String::new();
            for c in term.spelling().chars() {
                class.push('[');
                class.extend(c.to_lowercase());
                class.extend(c.to_uppercase());
                class.push(']');
            }
            Ok(format!("^({})(.*)$", class))
        }
    }
}

/// 五段活用の終止形語尾かどうかを判定します。
#[inline(always)]
pub fn is_godan_ending(c: char) -> bool {
    godan_surfaces(c).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Term, TermKind};
    use regex::Regex;

    fn compile(term: &Term) -> Regex {
        Regex::new(&surface_template(term).unwrap()).unwrap()
    }

    #[test]
    fn test_noun_template() {
        let term = Term::new("言/\\葉", "こと/\\ば", "0/0", "0\\0", TermKind::Noun, 0).unwrap();
        let re = compile(&term);
        let caps = re.captures("言葉です").unwrap();
        assert_eq!(&caps[1], "言葉");
        assert_eq!(&caps[2], "です");
    }

    #[test]
    fn test_godan_template() {
        let term = Term::new("読*む", "よ*む", "0*-1", "0*-1", TermKind::Godan, 0).unwrap();
        let re = compile(&term);
        for surface in ["読む", "読み", "読ん", "読め"] {
            let caps = re.captures(surface).unwrap();
            assert_eq!(&caps[1], surface);
        }
        assert!(re.captures("詠む").is_none());
    }

    #[test]
    fn test_adjective_template() {
        let term = Term::new("高*い", "たか*い", "0*-1", "0*-1", TermKind::Adjective, 0).unwrap();
        let re = compile(&term);
        let caps = re.captures("高ければ買わない").unwrap();
        assert_eq!(&caps[1], "高ければ");
        assert_eq!(&caps[2], "買わない");
    }

    #[test]
    fn test_kahen_template() {
        let term = Term::new("来る", "くる", "0", "0", TermKind::Kahen, 0).unwrap();
        let re = compile(&term);
        let caps = re.captures("来なければならない").unwrap();
        assert_eq!(&caps[1], "来なければ");
    }

    #[test]
    fn test_english_template() {
        let term = Term::new("ABC", "えいびーしー", "1", "0", TermKind::English, 0).unwrap();
        let re = compile(&term);
        assert!(re.is_match("abc"));
        assert!(re.is_match("AbC"));
        assert!(!re.is_match("abd"));
    }

    #[test]
    fn test_proper_template_escapes_metacharacters() {
        let term = Term::new(
            "DECO$*27",
            "でこにーな",
            "1",
            "0",
            TermKind::Proper,
            0,
        )
        .unwrap();
        let re = compile(&term);
        let caps = re.captures("DECO*27の曲").unwrap();
        assert_eq!(&caps[1], "DECO*27");
    }
}
