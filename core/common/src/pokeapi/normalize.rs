//! 生レスポンス → EntityRecord の正規化（純関数）

use crate::domain::{DetailLevel, EntityRecord, EntitySummary};
use crate::pokeapi::wire::{RawPokemonDetail, RawSprites};

/// 最初に見つかったスプライト URL。どれも無ければ None。
///
/// front_default → official-artwork → front_shiny の順に探す。
pub fn first_sprite_url(sprites: &RawSprites) -> Option<String> {
    let artwork = sprites
        .other
        .as_ref()
        .and_then(|o| o.official_artwork.as_ref())
        .and_then(|a| a.front_default.as_ref());
    [sprites.front_default.as_ref(), artwork, sprites.front_shiny.as_ref()]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .cloned()
}

/// 詳細レスポンスを正規化する
///
/// 名前は一覧の summary 側を使う（詳細側と表記が揺れることがあるため）。
/// 進化は別リソースなのでここでは埋めない。
pub fn normalize(
    summary: &EntitySummary,
    raw: &RawPokemonDetail,
    level: DetailLevel,
) -> EntityRecord {
    normalize_named(&summary.name, raw, level)
}

/// 名前を明示して正規化する（単体取得では詳細側の name を渡す）
pub fn normalize_named(name: &str, raw: &RawPokemonDetail, level: DetailLevel) -> EntityRecord {
    let abilities = level.includes_abilities().then(|| {
        raw.abilities
            .iter()
            .map(|a| a.ability.name.clone())
            .collect()
    });
    EntityRecord {
        id: raw.id,
        name: name.to_string(),
        image_url: first_sprite_url(&raw.sprites),
        types: raw.types.iter().map(|t| t.type_.name.clone()).collect(),
        abilities,
        evolutions: None,
        height: raw.height,
        weight: raw.weight,
    }
}
