//! 解析結果のトークン
//!
//! 行の解析結果は三種類のトークン形で取り出せます。
//! どの形でも、トークンの表層形を連結すると入力行が復元できます。

/// ルビ形式のトークン
///
/// 表層形と読み、および割付方法を持ちます。割付方法は
/// 0（均等割付）、1（表層形の幅に合わせる）、2（読みの幅に合わせる）の
/// いずれかです。読みを持たないトークンの割付方法は0です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubyToken {
    /// 表層形
    pub surface: String,

    /// 読み。表層形をそのまま表示する場合は`None`。
    pub reading: Option<String>,

    /// 割付方法
    pub alignment: u8,
}

/// 二段ルビ形式のトークン
///
/// 読みが表層形より長い場合に、読みを上下二段に分けて振るための形です。
/// 隣接する均等割付の区間が一つの表層形にまとめられます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualRubyToken {
    /// 表層形
    pub surface: String,

    /// 上段の読み
    pub upper: Option<String>,

    /// 下段の読み
    pub lower: Option<String>,
}

/// 区間形式のトークン
///
/// 同じ割付方法を持つ連続した区間を一つのトークンにまとめた形です。
/// 読み上げ処理などで、読みの確定した区間とそうでない区間を
/// 区別するために使用します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanToken {
    /// 表層形
    pub surface: String,

    /// 読み。確定していない場合は`None`。
    pub reading: Option<String>,

    /// 後段の処理で読み飛ばすべき区間かどうか
    pub skip: bool,
}
