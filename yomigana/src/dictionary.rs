//! 語彙辞書
//!
//! 語彙エントリの集合をIDつきで保持し、CSVとの相互変換、検索、
//! 行頭マッチを提供します。

use std::io::{Read, Write};

use crate::errors::{Result, YomiganaError};
use crate::markup;
use crate::term::{Term, TermKind};
use crate::utils;

/// CSVの必須列
pub const COLUMNS: [&str; 6] = [
    "Japanese",
    "Kana",
    "Division0",
    "Division1",
    "Type",
    "Priority",
];

/// 語彙辞書
///
/// 各エントリは追加時に採番されるIDを持ちます。IDは削除後も
/// 再利用されません。
#[derive(Debug, Clone, Default)]
pub struct TermDictionary {
    rows: Vec<(u32, Term)>,
    next_id: u32,
}

impl TermDictionary {
    /// 空の辞書を生成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// エントリ数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 辞書が空かどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 指定したIDのエントリを返します。
    pub fn get(&self, id: u32) -> Option<&Term> {
        self.rows
            .iter()
            .find(|(row_id, _)| *row_id == id)
            .map(|(_, term)| term)
    }

    /// すべてのエントリをID順に走査します。
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Term)> {
        self.rows.iter().map(|(id, term)| (*id, term))
    }

    /// 同じ内容のエントリが既に存在するかどうかを返します。
    pub fn contains(&self, term: &Term) -> bool {
        self.rows.iter().any(|(_, row)| row == term)
    }

    /// エントリを追加し、採番されたIDを返します。
    ///
    /// 同じ内容のエントリが既に存在する場合は追加せず`None`を返します。
    pub fn append(&mut self, term: Term) -> Option<u32> {
        if self.contains(&term) {
            log::warn!("term {:?} already exists in this dictionary", term.spelling());
            return None;
        }
        Some(self.push(term))
    }

    /// 指定したIDのエントリを削除します。
    ///
    /// エントリが存在した場合に`true`を返します。
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|(row_id, _)| *row_id != id);
        self.rows.len() != before
    }

    fn push(&mut self, term: Term) -> u32 {
        let id = self.next_id;
        self.rows.push((id, term));
        self.next_id += 1;
        id
    }

    /// CSVから辞書を読み込みます。
    ///
    /// ヘッダ行には[`COLUMNS`]のすべての列が（順不同で）含まれて
    /// いなければなりません。検証に失敗した行は警告を出して読み飛ばし、
    /// 残りの行から辞書を構築します。
    ///
    /// # エラー
    ///
    /// 必須列が欠けている場合は[`YomiganaError::InvalidFormat`]を、
    /// 読み込みに失敗した場合は[`YomiganaError::StdIo`]を返します。
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut text = String::new();
        rdr.read_to_string(&mut text)?;
        let mut lines = text.lines().enumerate();

        let header = match lines.next() {
            Some((_, header)) => utils::parse_csv_row(header),
            None => {
                return Err(YomiganaError::invalid_format(
                    "dictionary CSV",
                    "the header row is missing",
                ))
            }
        };
        let mut indices = [0; COLUMNS.len()];
        let mut missing = vec![];
        for (i, column) in COLUMNS.iter().enumerate() {
            match header.iter().position(|h| h == column) {
                Some(pos) => indices[i] = pos,
                None => missing.push(*column),
            }
        }
        if !missing.is_empty() {
            return Err(YomiganaError::invalid_format(
                "dictionary CSV",
                format!("the header row misses column(s): {}", missing.join(", ")),
            ));
        }

        let mut dict = Self::new();
        for (i, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields = utils::parse_csv_row(line);
            match Self::parse_row(&fields, &indices) {
                Ok(term) => {
                    dict.push(term);
                }
                Err(e) => {
                    log::warn!("dropping invalid row at line {}: {}", i + 1, e);
                }
            }
        }
        Ok(dict)
    }

    fn parse_row(fields: &[String], indices: &[usize; COLUMNS.len()]) -> Result<Term> {
        fn field<'a>(
            fields: &'a [String],
            indices: &[usize; COLUMNS.len()],
            i: usize,
        ) -> Result<&'a str> {
            fields.get(indices[i]).map(String::as_str).ok_or_else(|| {
                YomiganaError::invalid_format("dictionary CSV", "the row has too few fields")
            })
        }
        let kind = TermKind::from_label(field(fields, indices, 4)?).ok_or_else(|| {
            YomiganaError::invalid_format("dictionary CSV", "unknown term type label")
        })?;
        let priority: u32 = field(fields, indices, 5)?.parse()?;
        Term::new(
            field(fields, indices, 0)?,
            field(fields, indices, 1)?,
            field(fields, indices, 2)?,
            field(fields, indices, 3)?,
            kind,
            priority,
        )
    }

    /// 辞書をCSVとして書き出します。
    ///
    /// 列は[`COLUMNS`]の順で出力されます。
    pub fn to_writer<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        writeln!(wtr, "{}", COLUMNS.join(","))?;
        for (_, term) in &self.rows {
            let priority = term.priority().to_string();
            let cells = [
                term.spelling(),
                term.reading(),
                term.division0(),
                term.division1(),
                term.kind().as_label(),
                priority.as_str(),
            ];
            for (i, cell) in cells.iter().enumerate() {
                if i > 0 {
                    wtr.write_all(b",")?;
                }
                utils::quote_csv_cell(&mut wtr, cell.as_bytes())?;
            }
            wtr.write_all(b"\n")?;
        }
        Ok(())
    }

    /// 見出しまたは読みに部分文字列を含むエントリを集めた辞書を返します。
    ///
    /// 比較は区切り記法を取り除いた素の文字列に対して行われます。
    /// 返される辞書のIDは採番し直されます。
    pub fn find(&self, part: &str) -> Self {
        let mut result = Self::new();
        for (_, term) in &self.rows {
            if markup::plain(term.spelling()).contains(part)
                || markup::plain(term.reading()).contains(part)
            {
                result.push(term.clone());
            }
        }
        result
    }

    /// 行頭にマッチする最長のエントリを探します。
    ///
    /// 指定した優先度を持ち、見出しの先頭文字が行頭の文字と（大文字
    /// 小文字を無視して）一致するエントリを、素の見出しが長い順、
    /// 語幹が長い順に試します。
    ///
    /// # 戻り値
    ///
    /// `(エントリ, 出現形, 行の残り)`の三つ組。マッチするエントリが
    /// ない場合は`None`を返します。
    pub fn longest_match<'a>(
        &self,
        line: &'a str,
        priority: u32,
    ) -> Result<Option<(&Term, &'a str, &'a str)>> {
        let init = match line.chars().next() {
            Some(c) => c,
            None => return Ok(None),
        };
        let mut candidates: Vec<(usize, usize, &Term)> = self
            .rows
            .iter()
            .map(|(_, term)| term)
            .filter(|term| term.priority() == priority)
            .filter(|term| {
                term.spelling()
                    .chars()
                    .next()
                    .map_or(false, |c| c.to_lowercase().eq(init.to_lowercase()))
            })
            .map(|term| {
                let plain = markup::plain(term.spelling());
                let stem = markup::split_gobi(term.spelling())
                    .map(|(stem, _)| markup::plain(stem))
                    .unwrap_or_else(|_| plain.clone());
                (plain.chars().count(), stem.chars().count(), term)
            })
            .collect();
        candidates
            .sort_by(|(a_len, a_stem, _), (b_len, b_stem, _)| (b_len, b_stem).cmp(&(a_len, a_stem)));
        for (_, _, term) in candidates {
            let re = term.surface_pattern()?;
            if let Some(caps) = re.captures(line) {
                if let (Some(surface), Some(rest)) = (caps.get(1), caps.get(2)) {
                    return Ok(Some((term, surface.as_str(), rest.as_str())));
                }
            }
        }
        Ok(None)
    }
}
