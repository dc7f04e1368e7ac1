//! CSV処理のヘルパー関数

use std::io::Write;

use csv_core::ReadFieldResult;

/// CSVセルのデータを適切に引用符で囲んで書き出します。
///
/// フィールド内のカンマやダブルクォートは自動的にエスケープされます。
///
/// # 引数
///
/// * `wtr` - 書き込み先のWriterオブジェクト
/// * `data` - CSVセルとして書き込むバイト列
///
/// # エラー
///
/// 書き込み中にI/Oエラーが発生した場合、[`std::io::Error`]を返します。
pub fn quote_csv_cell<W>(mut wtr: W, mut data: &[u8]) -> std::io::Result<()>
where
    W: Write,
{
    let mut output = [0; 4096];
    let mut writer = csv_core::Writer::new();
    loop {
        let (result, nin, nout) = writer.field(data, &mut output);
        wtr.write_all(&output[..nout])?;
        if result == csv_core::WriteResult::InputEmpty {
            break;
        }
        data = &data[nin..];
    }
    let (result, nout) = writer.finish(&mut output);
    assert_eq!(result, csv_core::WriteResult::InputEmpty);
    wtr.write_all(&output[..nout])?;
    Ok(())
}

/// CSV形式の行を解析してフィールドのベクターに分割します。
///
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも
/// 正しく処理します。
///
/// # 引数
///
/// * `row` - 解析するCSV形式の文字列
///
/// # 例
///
/// ```
/// # use yomigana::utils::parse_csv_row;
/// let fields = parse_csv_row("東京,とうきょう");
/// assert_eq!(fields, vec!["東京", "とうきょう"]);
///
/// let fields_with_quote = parse_csv_row("名詞,\"1,2-ジクロロエタン\"");
/// assert_eq!(fields_with_quote, vec!["名詞", "1,2-ジクロロエタン"]);
/// ```
pub fn parse_csv_row(row: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let end = match result {
            ReadFieldResult::InputEmpty => true,
            ReadFieldResult::Field { .. } => false,
            ReadFieldResult::End => true,
            _ => unreachable!(),
        };
        fields.push(std::str::from_utf8(&output[..nout]).unwrap().to_string());
        if end {
            break;
        }
        bytes = &bytes[nin..];
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_csv_cell() {
        let mut out = vec![];
        quote_csv_cell(&mut out, "読*む".as_bytes()).unwrap();
        assert_eq!(out, "読*む".as_bytes());

        let mut out = vec![];
        quote_csv_cell(&mut out, b"a,b").unwrap();
        assert_eq!(out, b"\"a,b\"");
    }

    #[test]
    fn test_parse_csv_row() {
        assert_eq!(
            parse_csv_row("読*む,よ*む,0*-1,0*-1,五段,0"),
            vec!["読*む", "よ*む", "0*-1", "0*-1", "五段", "0"]
        );
        assert_eq!(parse_csv_row("\"a,b\",c"), vec!["a,b", "c"]);
    }
}
