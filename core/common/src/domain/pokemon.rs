//! ポケモンのドメイン型
//!
//! API の生レスポンスは `pokeapi::wire` に閉じ込め、ここには正規化後の安定した形だけを置く。

use serde::Serialize;

/// 一覧エンドポイントが返す `{ name, url }`（詳細取得のファンアウトにだけ使う）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub name: String,
    pub detail_url: String,
}

impl EntitySummary {
    pub fn new(name: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail_url: detail_url.into(),
        }
    }
}

/// 1 エンティティあたりに取得する依存リソースの深さ
///
/// 段階は累積する: `WithEvolutions` は特性も含む。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DetailLevel {
    /// 詳細リソースのみ
    #[default]
    Basic,
    /// 詳細リソースに含まれる特性も取り出す（追加リクエストなし）
    WithAbilities,
    /// species → evolution-chain も取得する
    WithEvolutions,
}

impl DetailLevel {
    pub fn includes_abilities(self) -> bool {
        self >= Self::WithAbilities
    }

    pub fn includes_evolutions(self) -> bool {
        self >= Self::WithEvolutions
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::WithAbilities => "with_abilities",
            Self::WithEvolutions => "with_evolutions",
        }
    }
}

/// 正規化済みのポケモン 1 件
///
/// 取得セッション内で `id` は一意。生成後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub id: u32,
    pub name: String,
    pub image_url: Option<String>,
    /// API の並び順のまま
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolutions: Option<Vec<String>>,
    /// デシメートル
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// ヘクトグラム
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl EntityRecord {
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }
}

/// 進化ツリーの 1 ノード（平坦化の間だけ存在する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionNode {
    pub species_name: String,
    pub children: Vec<EvolutionNode>,
}

impl EvolutionNode {
    pub fn leaf(species_name: impl Into<String>) -> Self {
        Self {
            species_name: species_name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(species_name: impl Into<String>, children: Vec<EvolutionNode>) -> Self {
        Self {
            species_name: species_name.into(),
            children,
        }
    }
}
