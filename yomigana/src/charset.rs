//! 文字種の判定
//!
//! 仮名・CJK統合漢字・辞書で許可される日本語文字集合の判定関数を提供します。

/// ひらがなかどうかを判定します。
///
/// ぁ (U+3041) から ゔ (U+3094) までをひらがなとみなします。
#[inline(always)]
pub fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3094}')
}

/// カタカナかどうかを判定します。
///
/// ァ (U+30A1) から ヺ (U+30FA) まで、および長音記号 ー (U+30FC) を
/// カタカナとみなします。
#[inline(always)]
pub fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A1}'..='\u{30FA}' | '\u{30FC}')
}

/// 仮名（ひらがなまたはカタカナ）かどうかを判定します。
#[inline(always)]
pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

/// CJK統合漢字（全拡張区を含む）かどうかを判定します。
///
/// 繰り返し記号 々 (U+3005) も漢字として扱います。
pub fn is_cjk_unified(c: char) -> bool {
    matches!(
        u32::from(c),
        0x4E00..=0x9FFF      // 基本区
        | 0x3400..=0x4DBF    // 拡張A
        | 0x20000..=0x2A6DF  // 拡張B
        | 0x2A700..=0x2B73F  // 拡張C
        | 0x2B740..=0x2B81F  // 拡張D
        | 0x2B820..=0x2CEAF  // 拡張E
        | 0x2CEB0..=0x2EBEF  // 拡張F
        | 0x30000..=0x3134F  // 拡張G
        | 0x31350..=0x323AF  // 拡張H
        | 0x2EBF0..=0x2EE5F  // 拡張I
        | 0x3005
    )
}

/// 辞書の見出し・読みに使用できる日本語文字かどうかを判定します。
///
/// CJK統合漢字、仮名、ASCII数字、および `.` `-` `+` を許可します。
#[inline(always)]
pub fn is_japanese(c: char) -> bool {
    is_cjk_unified(c) || is_kana(c) || c.is_ascii_digit() || matches!(c, '.' | '-' | '+')
}

/// 文字列全体が日本語文字集合に収まるかどうかを判定します。
#[inline(always)]
pub fn is_japanese_str(s: &str) -> bool {
    s.chars().all(is_japanese)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kana() {
        assert!(is_hiragana('あ'));
        assert!(is_hiragana('ゔ'));
        assert!(!is_hiragana('ア'));
        assert!(is_katakana('ア'));
        assert!(is_katakana('ー'));
        assert!(!is_katakana('あ'));
        assert!(is_kana('を'));
        assert!(is_kana('ヲ'));
        assert!(!is_kana('漢'));
    }

    #[test]
    fn test_cjk() {
        assert!(is_cjk_unified('漢'));
        assert!(is_cjk_unified('々'));
        assert!(is_cjk_unified('𠮷'));
        assert!(!is_cjk_unified('A'));
        assert!(!is_cjk_unified('あ'));
    }

    #[test]
    fn test_japanese_str() {
        assert!(is_japanese_str("読む"));
        assert!(is_japanese_str("1.5倍"));
        assert!(is_japanese_str("スーパー"));
        assert!(!is_japanese_str("ABC"));
        assert!(!is_japanese_str("読 む"));
    }
}
