//! 分割指定の自動推定
//!
//! 見出しと読みから、整合する分割指定の候補を列挙します。語幹を
//! 仮名・非仮名の連続区間に分け、非仮名区間ごとに境界の入れ方を
//! 総当たりで試します。候補数には上限があり、超えた場合は手動入力を
//! 促すエラーを返します。

use hashbrown::HashSet;
use regex::Regex;

use crate::charset;
use crate::errors::{Result, YomiganaError};
use crate::term::TermKind;

/// 一つの連続区間あたりの候補数の上限
pub const CHOICE_LIMIT: usize = 2000;

/// 非仮名区間に入れうる境界の種類
const SEPS: [&str; 3] = ["/", "/\\", ""];

/// 自動推定された分割指定の候補
///
/// そのまま[`Term::new`](crate::term::Term::new)に渡せる形の
/// 四つ組を保持します。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DivisionCandidate {
    /// 区切り記法つきの見出し
    pub spelling: String,

    /// 区切り記法つきの読み
    pub reading: String,

    /// 割付方式0の分割指定
    pub division0: String,

    /// 割付方式1の分割指定
    pub division1: String,
}

impl DivisionCandidate {
    fn new<S>(spelling: S, reading: S, division0: &str, division1: &str) -> Self
    where
        S: Into<String>,
    {
        Self {
            spelling: spelling.into(),
            reading: reading.into(),
            division0: division0.to_string(),
            division1: division1.to_string(),
        }
    }
}

/// 見出しと読みから分割指定の候補を列挙します。
///
/// # 引数
///
/// * `spelling` - 区切り記法を含まない見出し
/// * `reading` - 区切り記法を含まない読み
/// * `kind` - 品詞
///
/// # 戻り値
///
/// 整合する候補のリスト。入力が品詞の形に合わない場合は空リストを
/// 返します。
///
/// # エラー
///
/// 文字種が解析対象外の場合は[`YomiganaError::AutoDivisionUnsupported`]を、
/// 候補数が上限を超えた場合は[`YomiganaError::AutoDivisionOverflow`]を
/// 返します。
pub fn auto_divide(
    spelling: &str,
    reading: &str,
    kind: TermKind,
) -> Result<Vec<DivisionCandidate>> {
    if spelling.is_empty() || reading.is_empty() {
        return Ok(vec![]);
    }
    if !matches!(kind, TermKind::English | TermKind::Proper)
        && !(charset::is_japanese_str(spelling) && charset::is_japanese_str(reading))
    {
        return Err(YomiganaError::AutoDivisionUnsupported(format!(
            "unusable character in {spelling:?} or {reading:?}"
        )));
    }

    let stripped = match kind {
        TermKind::Godan => {
            match (spelling.chars().last(), reading.chars().last()) {
                (Some(jp_last), Some(kana_last))
                    if jp_last == kana_last && crate::pattern::is_godan_ending(jp_last) =>
                {
                    split_last_chars(spelling, 1).zip(split_last_chars(reading, 1))
                }
                _ => return Ok(vec![]),
            }
        }
        TermKind::Ichidan => strip_common_ending(spelling, reading, "る"),
        TermKind::Sahen => strip_common_ending(spelling, reading, "する"),
        TermKind::Adjective => strip_common_ending(spelling, reading, "い"),
        TermKind::Kahen => {
            if spelling == "来る" && reading == "くる" {
                return Ok(vec![DivisionCandidate::new("来る", "くる", "0", "0")]);
            }
            return Ok(vec![]);
        }
        TermKind::English => {
            return Ok(vec![DivisionCandidate::new(spelling, reading, "1", "0")]);
        }
        TermKind::Noun => Some(((spelling, ""), (reading, ""))),
        TermKind::Proper => {
            if !(charset::is_japanese_str(spelling) && charset::is_japanese_str(reading)) {
                return Err(YomiganaError::AutoDivisionUnsupported(format!(
                    "cannot infer divisions for proper noun {spelling:?}, \
                     please enter them manually"
                )));
            }
            Some(((spelling, ""), (reading, "")))
        }
    };
    let ((jp_stem, jp_ending), (kana_stem, kana_ending)) = match stripped {
        Some(parts) => parts,
        None => return Ok(vec![]),
    };
    if jp_stem.is_empty() || kana_stem.is_empty() {
        return Ok(vec![]);
    }

    // 語幹を仮名・非仮名の連続区間に分ける。
    let mut runs: Vec<(String, bool)> = vec![];
    for c in jp_stem.chars() {
        match runs.last_mut() {
            Some((text, is_kana)) if *is_kana == charset::is_kana(c) => text.push(c),
            _ => runs.push((c.to_string(), charset::is_kana(c))),
        }
    }

    // 読みの側の区間は、仮名区間をそのまま、非仮名区間を(.+)として
    // マッチさせて求める。
    let mut template = String::from("^");
    for (text, is_kana) in &runs {
        if *is_kana {
            template.push('(');
            template.push_str(text);
            template.push(')');
        } else {
            template.push_str("(.+)");
        }
    }
    template.push('$');
    let re = Regex::new(&template)?;
    let caps = match re.captures(kana_stem) {
        Some(caps) => caps,
        None => return Ok(vec![]),
    };

    let mut parts: Vec<Vec<DivisionCandidate>> = Vec::with_capacity(runs.len());
    for (i, (text, is_kana)) in runs.iter().enumerate() {
        let kana_run = caps.get(i + 1).map_or("", |m| m.as_str());
        if *is_kana {
            parts.push(vec![DivisionCandidate::new(text.as_str(), kana_run, "-1", "-1")]);
        } else {
            match run_candidates(text, kana_run)? {
                Some(choices) => parts.push(choices),
                None => return Ok(vec![]),
            }
        }
    }
    if parts.iter().any(Vec::is_empty) {
        return Ok(vec![]);
    }

    // 区間ごとの候補の直積をとり、語尾を付け直す。
    let mut result = vec![];
    let mut cursor = vec![0usize; parts.len()];
    loop {
        let picked: Vec<&DivisionCandidate> =
            cursor.iter().zip(&parts).map(|(&i, part)| &part[i]).collect();
        let join = |field: fn(&DivisionCandidate) -> &str, sep: &str| {
            picked
                .iter()
                .map(|&part| field(part))
                .collect::<Vec<_>>()
                .join(sep)
        };
        let mut spelling = join(|part| &part.spelling, "/\\");
        let mut reading = join(|part| &part.reading, "/\\");
        let mut division0 = join(|part| &part.division0, "/");
        let mut division1 = join(|part| &part.division1, "\\");
        if !jp_ending.is_empty() {
            spelling.push('*');
            spelling.push_str(jp_ending);
            reading.push('*');
            reading.push_str(kana_ending);
            division0.push_str("*-1");
            division1.push_str("*-1");
        }
        result.push(DivisionCandidate {
            spelling,
            reading,
            division0,
            division1,
        });

        let mut pos = cursor.len();
        loop {
            if pos == 0 {
                return Ok(result);
            }
            pos -= 1;
            cursor[pos] += 1;
            if cursor[pos] < parts[pos].len() {
                break;
            }
            cursor[pos] = 0;
        }
    }
}

/// 一つの非仮名区間に対する候補を列挙します。
///
/// 見出しの文字間への境界の入れ方を総当たりし、読みの側には
/// 同じ境界を文字数の差のぶんだけ位置をずらしながら展開します。
///
/// # 戻り値
///
/// 候補のリスト。読みと見出しの分割数が食い違った場合は`None`を
/// 返し、呼び出し側は推定全体を打ち切ります。
fn run_candidates(jp: &str, kana: &str) -> Result<Option<Vec<DivisionCandidate>>> {
    let jp_chars: Vec<char> = jp.chars().collect();
    let kana_chars: Vec<char> = kana.chars().collect();
    let repeat = (jp_chars.len() - 1).min(kana_chars.len() - 1);
    let mut choices: Vec<DivisionCandidate> = vec![];
    if repeat == 0 {
        choices.push(DivisionCandidate::new(jp, kana, "0", "0"));
    } else {
        let total = 3usize
            .checked_pow(repeat as u32)
            .ok_or(YomiganaError::AutoDivisionOverflow {
                limit: CHOICE_LIMIT,
            })?;
        for idx in 0..total {
            if choices.len() >= CHOICE_LIMIT {
                return Err(YomiganaError::AutoDivisionOverflow {
                    limit: CHOICE_LIMIT,
                });
            }
            // 3進数で境界の組み合わせを復元する。末尾の位が最も速く回る。
            let mut combo = Vec::with_capacity(repeat);
            let mut v = idx;
            for _ in 0..repeat {
                combo.push(SEPS[v % 3]);
                v /= 3;
            }
            combo.reverse();

            // 方式1の境界は一語に高々一つ。
            if combo.iter().filter(|sep| **sep == "/\\").count() > 1 {
                continue;
            }
            let jp_choice = interleave(&jp_chars, &combo);
            if kana_chars.len() < jp_chars.len() {
                choices.push(DivisionCandidate::new(jp, kana, "1", "0"));
                continue;
            }
            let fill = kana_chars.len() - jp_chars.len();
            let total_len = combo.len() + fill;
            let mut indices: Vec<usize> = (0..fill).collect();
            loop {
                if choices.len() >= CHOICE_LIMIT {
                    return Err(YomiganaError::AutoDivisionOverflow {
                        limit: CHOICE_LIMIT,
                    });
                }
                let kana_combo = apply_insertions(&combo, &indices, total_len);
                let kana_choice = interleave(&kana_chars, &kana_combo);

                let jp0 = jp_choice.replace('\\', "");
                let kana0 = kana_choice.replace('\\', "");
                let jp0_parts: Vec<&str> = jp0.split('/').collect();
                let kana0_parts: Vec<&str> = kana0.split('/').collect();
                if jp0_parts.len() != kana0_parts.len() {
                    log::error!(
                        "spelling and reading split into different part counts: {:?} vs {:?}",
                        jp0_parts,
                        kana0_parts
                    );
                    return Ok(None);
                }
                let division0 = jp0_parts
                    .iter()
                    .zip(&kana0_parts)
                    .map(|(jp_part, kana_part)| {
                        if jp_part.chars().count() == 1 {
                            "0"
                        } else if kana_part.chars().count() <= jp_part.chars().count() {
                            "2"
                        } else {
                            "1"
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("/");

                let jp1 = jp_choice.replace('/', "");
                let kana1 = kana_choice.replace('/', "");
                let jp1_count = jp1.split('\\').count();
                if jp1_count != kana1.split('\\').count() {
                    log::warn!(
                        "spelling and reading split into different part counts: {:?} vs {:?}",
                        jp1,
                        kana1
                    );
                }
                let division1 = vec!["0"; jp1_count].join("\\");
                choices.push(DivisionCandidate {
                    spelling: jp_choice.clone(),
                    reading: kana_choice,
                    division0,
                    division1,
                });

                if !next_combination(&mut indices, total_len) {
                    break;
                }
            }
        }
    }
    let mut seen = HashSet::new();
    choices.retain(|choice| seen.insert(choice.clone()));
    Ok(Some(choices))
}

/// 文字列の末尾`n`文字を切り離します。文字数が足りなければ`None`。
fn split_last_chars(s: &str, n: usize) -> Option<(&str, &str)> {
    let mut idx = s.len();
    let mut taken = 0;
    for (i, _) in s.char_indices().rev() {
        idx = i;
        taken += 1;
        if taken == n {
            break;
        }
    }
    (taken == n).then(|| s.split_at(idx))
}

/// 見出しと読みが同じ語尾で終わる場合に、両者から語尾を切り離します。
fn strip_common_ending<'a>(
    spelling: &'a str,
    reading: &'a str,
    ending: &str,
) -> Option<((&'a str, &'a str), (&'a str, &'a str))> {
    let jp = spelling.strip_suffix(ending)?;
    let kana = reading.strip_suffix(ending)?;
    Some(((jp, ending_of(spelling, jp)), (kana, ending_of(reading, kana))))
}

fn ending_of<'a>(whole: &'a str, stem: &str) -> &'a str {
    &whole[stem.len()..]
}

/// 文字列を文字と境界の交互連結で組み立てます。
fn interleave(chars: &[char], seps: &[&str]) -> String {
    let mut out = String::new();
    for (i, c) in chars.iter().enumerate() {
        out.push(*c);
        if let Some(sep) = seps.get(i) {
            out.push_str(sep);
        }
    }
    out
}

/// `base`の要素の間に、`indices`の位置へ空要素を差し込んだ列を返します。
fn apply_insertions<'a>(base: &[&'a str], indices: &[usize], total_len: usize) -> Vec<&'a str> {
    let mut out = Vec::with_capacity(total_len);
    let mut base_iter = base.iter();
    let mut idx_iter = indices.iter().peekable();
    for i in 0..total_len {
        if idx_iter.peek() == Some(&&i) {
            idx_iter.next();
            out.push("");
        } else {
            out.push(base_iter.next().copied().unwrap_or(""));
        }
    }
    out
}

/// 辞書式順序で次の組み合わせに進めます。最後の組み合わせなら`false`。
fn next_combination(indices: &mut [usize], total_len: usize) -> bool {
    let k = indices.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if indices[i] < total_len - (k - i) {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
