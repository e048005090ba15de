//! Pokédex 共通ライブラリ
//!
//! `pokedex` コマンドから使う PokéAPI の取得・正規化と、その周辺（設定・ログ・ポート）を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型
pub mod domain;

/// 設定（config.json）
pub mod config;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// PokéAPI の取得・正規化・進化チェーン
pub mod pokeapi;
