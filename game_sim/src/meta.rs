//! Path: game_sim/src/meta.rs
//! Summary: 永続メタ進行（ポイント・タレント・家宝）の読み込みとタレント購入リクエスト
//!
//! コアは永続化ストアへ直接書き込まない。購入や獲得は `FrameEvent` として
//! 永続化コラボレータへ渡す。

use crate::world::FrameEvent;
use game_core::item::ItemId;
use game_core::stats::BaseStats;
use game_core::talent::TalentId;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaLoadError {
    #[error("failed to read meta progress {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed meta progress: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PurchaseRejected {
    #[error("talent {0:?} is already at max level")]
    MaxLevel(TalentId),
    #[error("not enough points: need {need}, have {have}")]
    InsufficientPoints { need: u32, have: u32 },
}

/// 保存ファイルの生の形。ID は文字列のまま受け取り、解決時に未知 ID を捨てる
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MetaFile {
    points:    u32,
    talents:   BTreeMap<String, u32>,
    heirlooms: Vec<String>,
}

/// 起動時に読み込むメタ進行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaProgress {
    pub points:    u32,
    pub talents:   FxHashMap<TalentId, u32>,
    pub heirlooms: FxHashSet<ItemId>,
}

impl MetaProgress {
    pub fn from_json(text: &str) -> Result<Self, MetaLoadError> {
        let file: MetaFile = serde_json::from_str(text)?;
        Ok(Self::resolve(file))
    }

    /// 読み込みに失敗したら既定値（ポイント 0・タレントなし・家宝なし）
    pub fn load_or_default(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(|source| MetaLoadError::Io { path: path.to_path_buf(), source })
            .and_then(|text| Self::from_json(&text));
        match loaded {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("meta progress replaced with defaults: {e}");
                Self::default()
            }
        }
    }

    fn resolve(file: MetaFile) -> Self {
        let mut talents = FxHashMap::default();
        for (key, level) in file.talents {
            let Some(id) = TalentId::parse(&key) else {
                log::warn!("unknown talent id in meta progress: {key}");
                continue;
            };
            let max = id.def().max_level;
            if level > max {
                log::warn!("talent {key} level {level} clamped to {max}");
            }
            if level > 0 {
                talents.insert(id, level.min(max));
            }
        }

        let mut heirlooms = FxHashSet::default();
        for key in file.heirlooms {
            match ItemId::parse(&key) {
                Some(item) if item.is_heirloom() => {
                    heirlooms.insert(item);
                }
                Some(_) => log::warn!("item {key} is not an heirloom, ignored"),
                None => log::warn!("unknown heirloom id in meta progress: {key}"),
            }
        }

        Self { points: file.points, talents, heirlooms }
    }

    pub fn talent_level(&self, id: TalentId) -> u32 {
        self.talents.get(&id).copied().unwrap_or(0)
    }

    /// タレントを購入レベル分だけ適用した基礎ステータス（カタログ順に適用）
    pub fn base_stats(&self) -> BaseStats {
        let mut base = BaseStats::default();
        for id in TalentId::ALL {
            let level = self.talent_level(id);
            if level > 0 {
                base.apply_permanent(&id.def().per_level, level);
            }
        }
        base
    }

    /// 家宝をカタログ順で返す
    pub fn heirlooms_in_order(&self) -> Vec<ItemId> {
        ItemId::heirlooms().filter(|i| self.heirlooms.contains(i)).collect()
    }
}

/// タレント購入を検証し、永続化コラボレータ向けのリクエストイベントを返す。
/// `meta` 自体は変更しない。
pub fn request_talent_purchase(meta: &MetaProgress, id: TalentId) -> Result<FrameEvent, PurchaseRejected> {
    let cost = id
        .def()
        .next_cost(meta.talent_level(id))
        .ok_or(PurchaseRejected::MaxLevel(id))?;
    if meta.points < cost {
        return Err(PurchaseRejected::InsufficientPoints { need: cost, have: meta.points });
    }
    log::debug!("talent purchase requested: {} for {cost}", id.as_str());
    Ok(FrameEvent::TalentPurchaseRequested { talent: id, cost })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_are_dropped() {
        let meta = MetaProgress::from_json(
            r#"{ "points": 12, "talents": { "toughness": 2, "luck": 4 }, "heirlooms": ["ancestor_blade", "iron_sword", "nope"] }"#,
        )
        .unwrap();
        assert_eq!(meta.points, 12);
        assert_eq!(meta.talent_level(TalentId::Toughness), 2);
        assert_eq!(meta.talents.len(), 1);
        assert_eq!(meta.heirlooms_in_order(), vec![ItemId::AncestorBlade]);
    }

    #[test]
    fn missing_fields_default() {
        let meta = MetaProgress::from_json("{}").unwrap();
        assert_eq!(meta, MetaProgress::default());
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        assert!(MetaProgress::from_json("not json").is_err());
        let meta = MetaProgress::load_or_default(Path::new("/nonexistent/meta.json"));
        assert_eq!(meta, MetaProgress::default());
    }

    #[test]
    fn talents_raise_base_stats() {
        let meta = MetaProgress::from_json(r#"{ "talents": { "toughness": 3, "power": 1 } }"#).unwrap();
        let base = meta.base_stats();
        assert!((base.max_hp - 260.0).abs() < 1e-4);
        assert!((base.damage - 38.0).abs() < 1e-4);
    }

    #[test]
    fn purchase_checks_cost_and_cap() {
        let mut meta = MetaProgress { points: 4, ..MetaProgress::default() };
        assert_eq!(
            request_talent_purchase(&meta, TalentId::Power),
            Err(PurchaseRejected::InsufficientPoints { need: 5, have: 4 })
        );
        meta.points = 100;
        assert_eq!(
            request_talent_purchase(&meta, TalentId::Power),
            Ok(FrameEvent::TalentPurchaseRequested { talent: TalentId::Power, cost: 5 })
        );
        meta.talents.insert(TalentId::Agility, 5);
        assert_eq!(
            request_talent_purchase(&meta, TalentId::Agility),
            Err(PurchaseRejected::MaxLevel(TalentId::Agility))
        );
    }
}
