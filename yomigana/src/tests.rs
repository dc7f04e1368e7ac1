//! Yomiganaのテストモジュール群
//!
//! 辞書・トークナイザ・自動推定を組み合わせた、モジュール横断の
//! 動作を検証するテストを含みます。
