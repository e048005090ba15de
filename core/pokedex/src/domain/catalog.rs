//! 一覧の絞り込みとページ分け（純関数）
//!
//! 名前は大文字小文字を無視した部分一致、タイプは完全一致のメンバーシップ。
//! 絞り込んでからページに切るので、一致したものはどのページかに必ず現れる。

use common::domain::EntityRecord;
use common::error::Error;

/// 一覧表示の条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub type_name: Option<String>,
    /// 1 始まり
    pub page: usize,
    /// None のとき config の page_size
    pub page_size: Option<usize>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: None,
            type_name: None,
            page: 1,
            page_size: None,
        }
    }
}

impl CatalogQuery {
    pub fn matches(&self, record: &EntityRecord) -> bool {
        if let Some(t) = self.type_name.as_deref().filter(|t| !t.is_empty()) {
            if !record.has_type(t) {
                return false;
            }
        }
        if let Some(s) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !record.name.to_lowercase().contains(&s.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// 条件に合うものだけを元の順序で残す
pub fn filter(records: Vec<EntityRecord>, query: &CatalogQuery) -> Vec<EntityRecord> {
    records.into_iter().filter(|r| query.matches(r)).collect()
}

/// 1 ページ分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1 始まり
    pub page: usize,
    pub page_count: usize,
    /// 絞り込み後の総数
    pub total: usize,
}

/// 1 始まりのページで切り出す。範囲外のページは空。
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Result<Page<T>, Error> {
    if page == 0 {
        return Err(Error::invalid_argument("Page numbers start at 1"));
    }
    if page_size == 0 {
        return Err(Error::invalid_argument("Page size must be at least 1"));
    }
    let total = items.len();
    let page_count = total.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);
    let items = items.into_iter().skip(start).take(page_size).collect();
    Ok(Page {
        items,
        page,
        page_count,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: u32, name: &str, types: &[&str]) -> EntityRecord {
        EntityRecord {
            id,
            name: name.to_string(),
            image_url: None,
            types: types.iter().map(|t| t.to_string()).collect(),
            abilities: None,
            evolutions: None,
            height: None,
            weight: None,
        }
    }

    fn sample() -> Vec<EntityRecord> {
        vec![
            rec(1, "bulbasaur", &["grass", "poison"]),
            rec(4, "charmander", &["fire"]),
            rec(6, "charizard", &["fire", "flying"]),
            rec(7, "squirtle", &["water"]),
        ]
    }

    #[test]
    fn test_filter_search_is_case_insensitive_substring() {
        let q = CatalogQuery {
            search: Some("CHAR".to_string()),
            ..Default::default()
        };
        let names: Vec<_> = filter(sample(), &q).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["charmander", "charizard"]);
    }

    #[test]
    fn test_filter_type_is_exact_membership() {
        let q = CatalogQuery {
            type_name: Some("fire".to_string()),
            ..Default::default()
        };
        assert_eq!(filter(sample(), &q).len(), 2);

        let q = CatalogQuery {
            type_name: Some("fir".to_string()),
            ..Default::default()
        };
        assert!(filter(sample(), &q).is_empty());
    }

    #[test]
    fn test_filter_combines_search_and_type() {
        let q = CatalogQuery {
            search: Some("char".to_string()),
            type_name: Some("flying".to_string()),
            ..Default::default()
        };
        let out = filter(sample(), &q);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "charizard");
    }

    #[test]
    fn test_empty_conditions_match_all() {
        let q = CatalogQuery {
            search: Some(String::new()),
            type_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter(sample(), &q).len(), 4);
    }

    #[test]
    fn test_paginate_one_indexed() {
        let items: Vec<u32> = (1..=7).collect();
        let p1 = paginate(items.clone(), 1, 3).unwrap();
        assert_eq!(p1.items, vec![1, 2, 3]);
        assert_eq!(p1.page_count, 3);
        assert_eq!(p1.total, 7);
        let p3 = paginate(items.clone(), 3, 3).unwrap();
        assert_eq!(p3.items, vec![7]);
        let p4 = paginate(items, 4, 3).unwrap();
        assert!(p4.items.is_empty());
    }

    #[test]
    fn test_paginate_empty_has_no_pages() {
        let p = paginate(Vec::<u32>::new(), 1, 50).unwrap();
        assert_eq!(p.page_count, 0);
        assert!(p.items.is_empty());
    }

    #[test]
    fn test_paginate_rejects_page_zero() {
        let err = paginate(vec![1], 0, 10).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }
}
