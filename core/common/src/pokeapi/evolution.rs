//! 進化チェーンの平坦化

use crate::domain::EvolutionNode;
use crate::pokeapi::wire::RawChainLink;

/// 進化ツリーを行きがけ順（pre-order）の種族名列にする
///
/// 分岐（イーブイ等）はすべての子を API の並び順でたどる。
pub fn flatten(root: &EvolutionNode) -> Vec<String> {
    let mut names = Vec::new();
    visit(root, &mut names);
    names
}

fn visit(node: &EvolutionNode, out: &mut Vec<String>) {
    out.push(node.species_name.clone());
    for child in &node.children {
        visit(child, out);
    }
}

impl From<&RawChainLink> for EvolutionNode {
    fn from(link: &RawChainLink) -> Self {
        EvolutionNode::with_children(
            link.species.name.clone(),
            link.evolves_to.iter().map(EvolutionNode::from).collect(),
        )
    }
}
