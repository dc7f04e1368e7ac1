//! エラー型の定義
//!
//! このモジュールは、yomiganaライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt::{self, Debug};

/// yomigana専用のResult型
///
/// エラー型としてデフォルトで[`YomiganaError`]を使用します。
pub type Result<T, E = YomiganaError> = std::result::Result<T, E>;

/// yomiganaのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
#[derive(Debug, thiserror::Error)]
pub enum YomiganaError {
    /// 不正な語彙エントリ
    ///
    /// [`InvalidTermError`]のエラーバリアント。
    /// 構築時の検証に失敗した語は辞書に保存されません。
    #[error(transparent)]
    InvalidTerm(InvalidTermError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 無効な状態エラー
    ///
    /// [`InvalidStateError`]のエラーバリアント。
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// 不正な分割指定
    ///
    /// [`MalformedDivisionError`]のエラーバリアント。
    /// 保存済みデータの整合性が壊れている場合に発生します。
    #[error(transparent)]
    MalformedDivision(MalformedDivisionError),

    /// 自動分割が利用できない入力
    ///
    /// 入力の文字種が解析対象外である場合に発生します。
    /// 手動で分割指定を入力する必要があります。
    #[error("auto division is not available: {0}")]
    AutoDivisionUnsupported(String),

    /// 自動分割の候補数超過
    ///
    /// 一つの連続区間の候補数が上限を超えた場合に発生します。
    /// 曖昧すぎて自動では解けないことを示します。
    #[error("too many division candidates (more than {limit}); enter divisions manually")]
    AutoDivisionOverflow {
        /// 候補数の上限
        limit: usize,
    },

    /// 整数パースエラー
    ///
    /// [`ParseIntError`](std::num::ParseIntError)のエラーバリアント。
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    /// 正規表現のコンパイルエラー
    ///
    /// [`regex::Error`]のエラーバリアント。
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    StdIo(#[from] std::io::Error),
}

impl YomiganaError {
    /// 不正な語彙エントリエラーを生成します
    ///
    /// # 引数
    ///
    /// * `field` - 検証に失敗したフィールドの名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_term<S>(field: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidTerm(InvalidTermError {
            field,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }

    /// 不正な分割指定エラーを生成します
    ///
    /// # 引数
    ///
    /// * `value` - 問題のある文字列
    /// * `msg` - エラーメッセージ
    pub(crate) fn malformed_division<V, S>(value: V, msg: S) -> Self
    where
        V: Into<String>,
        S: Into<String>,
    {
        Self::MalformedDivision(MalformedDivisionError {
            value: value.into(),
            msg: msg.into(),
        })
    }
}

/// 語彙エントリの構築時検証に失敗した場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidTermError {
    /// 検証に失敗したフィールドの名前
    pub(crate) field: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidTermError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidTermError: {}: {}", self.field, self.msg)
    }
}

impl Error for InvalidTermError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}

/// 分割指定文字列が復号できない場合に使用されるエラー
///
/// 語幹と語尾の区切りが複数箇所に現れるなど、保存済みの語彙データの
/// 整合性が壊れていることを示します。推測で補正せず、そのまま伝播させます。
#[derive(Debug)]
pub struct MalformedDivisionError {
    /// 問題のある文字列
    pub(crate) value: String,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for MalformedDivisionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MalformedDivisionError: {:?}: {}", self.value, self.msg)
    }
}

impl Error for MalformedDivisionError {}
